/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! NoteDx API client
//!
//! [`Client`] owns the configuration, the authentication state, the HTTP
//! client and the rate limiter. Every resource service funnels through
//! [`Client::request`], which picks the credentials, runs the request with
//! retry and refreshes an expired token once before giving up.

use crate::application::auth::{Auth, AuthMethod, Session};
use crate::application::config::Config;
use crate::application::rate_limiter::RateLimiter;
use crate::constants::{FIREBASE_AUTH_REQUIRED, USER_AGENT};
use crate::error::AppError;
use crate::model::http::{build_headers, build_url, make_http_request, parse_response};
use crate::model::requests::CreateAccountRequest;
use crate::model::responses::CreateAccountResponse;
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Endpoint used to register a new account
pub const CREATE_ACCOUNT_PATH: &str = "auth/create-account";

/// Client for the NoteDx API
///
/// Resource operations are available through the service traits in
/// [`crate::application::interfaces`], all implemented for this type.
pub struct Client {
    config: Arc<Config>,
    auth: Arc<Auth>,
    http_client: reqwest::Client,
    rate_limiter: RateLimiter,
}

fn build_http_client(config: &Config) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.rest_api.timeout))
        .connect_timeout(Duration::from_secs(config.rest_api.connect_timeout))
        .build()
        .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {e}")))
}

impl Client {
    /// Creates a client and logs in when email/password are configured
    ///
    /// Clients using only an API key never log in. With `auto_login`
    /// disabled the login is deferred to the first request.
    ///
    /// # Errors
    /// [`AppError::Authentication`] when no credentials are configured or
    /// the login is rejected.
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let client = Self::new_lazy(config)?;
        let credentials = client.auth.credentials().await;
        if client.config.auto_login && credentials.has_login() {
            client.auth.login().await?;
        }
        Ok(client)
    }

    /// Creates a client without contacting the API
    ///
    /// # Errors
    /// [`AppError::Authentication`] when no credentials are configured.
    pub fn new_lazy(config: Config) -> Result<Self, AppError> {
        config.credentials.validate()?;

        let http_client = build_http_client(&config)?;
        let rate_limiter = RateLimiter::new(&config.rate_limiter);
        let config = Arc::new(config);
        let auth = Arc::new(Auth::new(
            config.clone(),
            http_client.clone(),
            rate_limiter.clone(),
        ));

        debug!("NoteDx client created for {}", config.rest_api.base_url);
        Ok(Self {
            config,
            auth,
            http_client,
            rate_limiter,
        })
    }

    /// Creates a client from environment variables, see [`Config::new`]
    pub async fn from_env() -> Result<Self, AppError> {
        Self::new(Config::new()).await
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.rest_api.base_url
    }

    /// Client configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Authentication manager
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Shared rate limiter
    #[must_use]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Underlying HTTP client
    #[must_use]
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Replaces the API key
    pub async fn set_api_key(&self, api_key: &str) {
        self.auth.set_api_key(api_key).await;
    }

    /// Installs a bearer token obtained elsewhere
    pub async fn set_token(&self, token: &str, refresh_token: Option<&str>) {
        self.auth.set_token(token, refresh_token).await;
    }

    /// Logs in with the configured email and password
    pub async fn login(&self) -> Result<Session, AppError> {
        self.auth.login().await
    }

    /// Refreshes the bearer token, logging in again when the refresh fails
    pub async fn refresh_token(&self) -> Result<Session, AppError> {
        self.auth.refresh_token().await
    }

    /// Clears the current session
    pub async fn logout(&self) -> Result<(), AppError> {
        self.auth.logout().await
    }

    /// Returns a valid session, refreshing or logging in when needed
    pub async fn get_session(&self) -> Result<Session, AppError> {
        self.auth.get_session().await
    }

    /// Fails unless the client can authenticate with a bearer token
    ///
    /// Account, key and webhook endpoints reject API keys.
    pub(crate) async fn ensure_token_auth(&self) -> Result<(), AppError> {
        if self.auth.has_token().await {
            return Ok(());
        }
        if self.auth.credentials().await.has_login() {
            return self.auth.get_session().await.map(|_| ());
        }
        Err(AppError::Authentication(FIREBASE_AUTH_REQUIRED.to_string()))
    }

    /// Runs one request with the current credentials
    ///
    /// Returns the bearer token that was sent, if any, next to the result so
    /// a rejected token can be refreshed without racing other requests.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<(Result<Response, AppError>, Option<String>), AppError> {
        let (headers, auth_method) = self.auth.auth_headers().await?;
        let bearer = bearer_token(&headers);
        let result = make_http_request(
            &self.http_client,
            &self.rate_limiter,
            method.clone(),
            url,
            &headers,
            query,
            body,
            &self.config.retry,
            auth_method,
        )
        .await;
        Ok((result, bearer))
    }

    /// Sends a request and decodes the response
    ///
    /// When the bearer token is rejected the session is refreshed (or
    /// re-established with a login) and the request is retried once.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Endpoint path relative to the base URL
    /// * `query` - Query string parameters
    /// * `body` - Optional JSON body
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = build_url(self.base_url(), path);

        let response = match self.send(&method, &url, query, body).await? {
            (Err(AppError::TokenExpired), bearer) => {
                info!("Token expired, refreshing and retrying {} {}", method, path);
                self.auth
                    .refresh_if_stale(bearer.as_deref().unwrap_or_default())
                    .await?;

                match self.send(&method, &url, query, body).await?.0 {
                    Err(AppError::TokenExpired) => {
                        warn!("Token rejected again after refresh");
                        return Err(AppError::Authentication(
                            "Authentication failed: token rejected after refresh".to_string(),
                        ));
                    }
                    other => other?,
                }
            }
            (other, _) => other?,
        };

        parse_response(response).await
    }

    /// `GET` without query parameters
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request::<(), T>(Method::GET, path, &[], None).await
    }

    /// `GET` with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, AppError> {
        self.request::<(), T>(Method::GET, path, query, None).await
    }

    /// `POST` with an optional JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, AppError> {
        self.request(Method::POST, path, &[], body).await
    }

    /// `PUT` with a JSON body
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// `DELETE` without body
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request::<(), T>(Method::DELETE, path, &[], None).await
    }

    /// `DELETE` with a JSON body
    pub async fn delete_with_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.request(Method::DELETE, path, &[], Some(body)).await
    }

    /// Registers a new account; no credentials are needed
    ///
    /// # Arguments
    /// * `config` - Supplies the base URL, timeouts and retry policy
    /// * `request` - Login email, password, company name and optional contact details
    pub async fn create_account(
        config: &Config,
        request: &CreateAccountRequest,
    ) -> Result<CreateAccountResponse, AppError> {
        request.validate()?;

        let http_client = build_http_client(config)?;
        let rate_limiter = RateLimiter::new(&config.rate_limiter);
        let url = build_url(&config.rest_api.base_url, CREATE_ACCOUNT_PATH);

        info!("Creating account for {}", request.email);
        let response = make_http_request(
            &http_client,
            &rate_limiter,
            Method::POST,
            &url,
            &build_headers(None, None),
            &[],
            Some(request),
            &config.retry,
            AuthMethod::None,
        )
        .await?;

        let created: CreateAccountResponse = parse_response(response).await?;
        info!("✓ Account created for {}", request.email);
        Ok(created)
    }
}

fn bearer_token(headers: &[(String, String)]) -> Option<String> {
    headers
        .iter()
        .find(|(name, _)| name == "Authorization")
        .and_then(|(_, value)| value.strip_prefix("Bearer "))
        .map(String::from)
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.rest_api.base_url)
            .field("rate_limiter", &self.rate_limiter)
            .finish()
    }
}
