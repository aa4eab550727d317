/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Authentication module for the NoteDx API
//!
//! This module owns credentials and session state and handles:
//! - API key authentication (`X-Api-Key` header)
//! - Email/password login returning a bearer token and a refresh token
//! - Proactive refresh of tokens that are about to expire
//! - Fallback to a full login when the refresh token is rejected

use crate::application::config::{Config, Credentials};
use crate::application::rate_limiter::RateLimiter;
use crate::constants::{DEFAULT_TOKEN_EXPIRES_IN_SECS, TOKEN_REFRESH_MARGIN_SECS};
use crate::error::AppError;
use crate::model::auth::{LoginRequest, RefreshRequest, TokenResponse};
use crate::model::http::{build_headers, build_url, make_http_request, parse_response};
use chrono::Utc;
use reqwest::{Client, Method};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

/// Endpoint used to exchange email/password for tokens
pub const LOGIN_PATH: &str = "auth/login";
/// Endpoint used to exchange a refresh token for a new bearer token
pub const REFRESH_PATH: &str = "auth/refresh";

/// Authentication method attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization: Bearer <token>`
    Token,
    /// `X-Api-Key: <key>`
    ApiKey,
    /// No credentials (login, refresh, account creation)
    None,
}

/// Session information for token authenticated requests
#[derive(Clone)]
pub struct Session {
    /// Bearer token
    pub access_token: String,
    /// Token used to obtain a new bearer token
    pub refresh_token: Option<String>,
    /// Identifier of the authenticated user
    pub user_id: Option<String>,
    /// Email of the authenticated user
    pub email: Option<String>,
    /// Unix timestamp when the bearer token expires (seconds since epoch)
    pub expires_at: u64,
    /// Lifetime of the bearer token in seconds, as issued
    pub expires_in: u64,
}

impl Session {
    /// Creates a session from a token pair, assuming the default token lifetime
    pub fn new(access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
            user_id: None,
            email: None,
            expires_at: now_secs().saturating_add(DEFAULT_TOKEN_EXPIRES_IN_SECS),
            expires_in: DEFAULT_TOKEN_EXPIRES_IN_SECS,
        }
    }

    /// Seconds before expiry at which the token is refreshed
    ///
    /// Five minutes, but never more than half the token lifetime so short
    /// lived tokens are not refreshed on every request.
    #[must_use]
    pub fn refresh_margin(&self) -> u64 {
        TOKEN_REFRESH_MARGIN_SECS.min(self.expires_in / 2)
    }

    /// Whether the token is inside its refresh window
    #[must_use]
    pub fn should_refresh(&self) -> bool {
        self.needs_token_refresh(Some(self.refresh_margin()))
    }

    /// Checks if session is expired or will expire soon
    ///
    /// # Arguments
    /// * `margin_seconds` - Safety margin in seconds (default: 60 = 1 minute)
    #[must_use]
    pub fn is_expired(&self, margin_seconds: Option<u64>) -> bool {
        let margin = margin_seconds.unwrap_or(60);
        now_secs() >= self.expires_at.saturating_sub(margin)
    }

    /// Gets the number of seconds until the session expires (0 once expired)
    #[must_use]
    pub fn seconds_until_expiry(&self) -> u64 {
        self.expires_at.saturating_sub(now_secs())
    }

    /// Checks if the token needs refresh (alias for [`Session::is_expired`])
    #[must_use]
    pub fn needs_token_refresh(&self, margin_seconds: Option<u64>) -> bool {
        self.is_expired(margin_seconds)
    }

    /// Whether a refresh token is available
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

fn now_secs() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Authentication manager for the NoteDx API
///
/// Handles all authentication operations including:
/// - Login with email and password
/// - Automatic token refresh
/// - Re-authentication when the refresh token is rejected
/// - Choosing the headers for each request
pub struct Auth {
    config: Arc<Config>,
    client: Client,
    rate_limiter: RateLimiter,
    credentials: RwLock<Credentials>,
    session: RwLock<Option<Session>>,
    refresh_lock: Mutex<()>,
}

impl Auth {
    /// Creates a new Auth instance
    ///
    /// # Arguments
    /// * `config` - Configuration containing credentials and API settings
    /// * `client` - HTTP client shared with the request layer
    /// * `rate_limiter` - Rate limiter shared with the request layer
    pub fn new(config: Arc<Config>, client: Client, rate_limiter: RateLimiter) -> Self {
        let credentials = config.credentials.clone();
        Self {
            config,
            client,
            rate_limiter,
            credentials: RwLock::new(credentials),
            session: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns a copy of the current credentials
    pub async fn credentials(&self) -> Credentials {
        self.credentials.read().await.clone()
    }

    /// Replaces the API key used when no bearer token is available
    pub async fn set_api_key(&self, api_key: &str) {
        let mut credentials = self.credentials.write().await;
        credentials.api_key = Some(api_key.to_string());
        debug!("API key updated");
    }

    /// Installs a bearer token (and optional refresh token) obtained elsewhere
    pub async fn set_token(&self, token: &str, refresh_token: Option<&str>) {
        let session = Session::new(token.to_string(), refresh_token.map(String::from));
        *self.session.write().await = Some(session);
        debug!("Session token set manually");
    }

    /// Whether a bearer token is currently held
    pub async fn has_token(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Returns the stored session without refreshing it
    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Gets the current session, ensuring tokens are valid
    ///
    /// Tokens expiring within five minutes are refreshed first. Without a
    /// session a login is performed when email and password are configured.
    ///
    /// # Returns
    /// * `Ok(Session)` - Valid session with fresh tokens
    /// * `Err(AppError)` - If authentication fails or is not possible
    pub async fn get_session(&self) -> Result<Session, AppError> {
        let current = self.session.read().await.clone();

        match current {
            Some(sess) if sess.should_refresh() => {
                debug!("Token expires in {}s, refreshing", sess.seconds_until_expiry());
                self.refresh_if_stale(&sess.access_token).await
            }
            Some(sess) => Ok(sess),
            None => {
                if self.credentials.read().await.has_login() {
                    self.login_if_absent().await
                } else {
                    Err(AppError::Authentication(
                        "No active session. Log in with email and password first".to_string(),
                    ))
                }
            }
        }
    }

    /// Returns a valid bearer token, refreshing it first when it is about to expire
    pub async fn current_token(&self) -> Result<String, AppError> {
        self.get_session().await.map(|s| s.access_token)
    }

    /// Headers and auth method for the next request
    ///
    /// A bearer token takes precedence over the API key. Without either a
    /// login is attempted when email and password are available.
    pub async fn auth_headers(&self) -> Result<(Vec<(String, String)>, AuthMethod), AppError> {
        let has_session = self.session.read().await.is_some();
        let credentials = self.credentials.read().await.clone();

        if has_session || (!credentials.has_api_key() && credentials.has_login()) {
            let session = self.get_session().await?;
            return Ok((
                build_headers(Some(&session.access_token), None),
                AuthMethod::Token,
            ));
        }

        if credentials.has_api_key() {
            return Ok((
                build_headers(None, credentials.api_key.as_deref()),
                AuthMethod::ApiKey,
            ));
        }

        Err(AppError::Authentication(
            "No authentication credentials provided".to_string(),
        ))
    }

    /// Performs a login with the configured email and password
    ///
    /// # Returns
    /// * `Ok(Session)` - Authenticated session
    /// * `Err(AppError)` - If credentials are missing or rejected
    pub async fn login(&self) -> Result<Session, AppError> {
        let credentials = self.credentials.read().await.clone();
        let (Some(email), Some(password)) = (credentials.email, credentials.password) else {
            return Err(AppError::Authentication(
                "Email and password are required for login".to_string(),
            ));
        };

        let url = build_url(&self.config.rest_api.base_url, LOGIN_PATH);
        debug!("Sending login request to: {}", url);

        let body = LoginRequest {
            email: &email,
            password: &password,
        };

        let response = make_http_request(
            &self.client,
            &self.rate_limiter,
            Method::POST,
            &url,
            &build_headers(None, None),
            &[],
            Some(&body),
            &self.config.retry,
            AuthMethod::None,
        )
        .await
        .inspect_err(|e| error!("Login failed: {}", e))?;

        let token: TokenResponse = parse_response(response)
            .await
            .map_err(|e| AppError::Authentication(format!("Invalid login response: {e}")))?;

        let session = Session::from(token);
        *self.session.write().await = Some(session.clone());

        info!("✓ Login successful for {}", email);
        Ok(session)
    }

    /// Logs in unless another task established a session while waiting
    async fn login_if_absent(&self) -> Result<Session, AppError> {
        let _guard = self.refresh_lock.lock().await;
        if let Some(sess) = self.session.read().await.clone() {
            debug!("Session established by a concurrent request");
            return Ok(sess);
        }
        info!("No active session, logging in");
        self.login().await
    }

    /// Refreshes the bearer token
    ///
    /// Uses the refresh token when one is held. If the refresh is rejected
    /// (or there is no refresh token) a full login is performed when email
    /// and password are configured.
    ///
    /// # Returns
    /// * `Ok(Session)` - New session with refreshed tokens
    /// * `Err(AppError)` - If refresh and re-authentication both fail
    pub async fn refresh_token(&self) -> Result<Session, AppError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Refreshes unless another task already replaced `stale_token`
    pub(crate) async fn refresh_if_stale(&self, stale_token: &str) -> Result<Session, AppError> {
        let _guard = self.refresh_lock.lock().await;
        if let Some(sess) = self.session.read().await.clone() {
            if sess.access_token != stale_token
                && !sess.should_refresh()
            {
                debug!("Token already refreshed by a concurrent request");
                return Ok(sess);
            }
        }
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<Session, AppError> {
        let current = self.session.read().await.clone();

        if let Some(refresh) = current.as_ref().and_then(|s| s.refresh_token.clone()) {
            info!("Refreshing access token");
            match self.request_refresh(&refresh).await {
                Ok(session) => {
                    *self.session.write().await = Some(session.clone());
                    info!("✓ Token refreshed successfully");
                    return Ok(session);
                }
                Err(e) => {
                    warn!("Token refresh failed: {}", e);
                    warn!("Refresh token may be expired, attempting full re-authentication");
                }
            }
        } else {
            debug!("No refresh token available");
        }

        if self.credentials.read().await.has_login() {
            return self.login().await;
        }

        *self.session.write().await = None;
        Err(AppError::Authentication(
            "Session expired and no email/password available to re-authenticate".to_string(),
        ))
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<Session, AppError> {
        let url = build_url(&self.config.rest_api.base_url, REFRESH_PATH);
        let body = RefreshRequest { refresh_token };

        let response = make_http_request(
            &self.client,
            &self.rate_limiter,
            Method::POST,
            &url,
            &build_headers(None, None),
            &[],
            Some(&body),
            &self.config.retry,
            AuthMethod::None,
        )
        .await?;

        let token: TokenResponse = parse_response(response).await?;
        Ok(token.into_session(Some(refresh_token.to_string())))
    }

    /// Logs out and clears the current session
    pub async fn logout(&self) -> Result<(), AppError> {
        info!("Logging out");
        *self.session.write().await = None;
        info!("✓ Logged out successfully");
        Ok(())
    }
}
