/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_RATE_LIMIT_BURST_SIZE,
    DEFAULT_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_PERIOD_SECONDS, DEFAULT_TIMEOUT_SECS,
};
use crate::error::AppError;
use crate::model::retry::RetryConfig;
use crate::utils::config::{get_env, get_env_flag, get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default)]
/// Authentication credentials for the NoteDx API
///
/// Either an API key or an email/password pair must be present. Secrets are
/// never serialized, so printing a config does not leak them.
pub struct Credentials {
    /// API key used with the `X-Api-Key` header
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    /// Account email used for token login
    pub email: Option<String>,
    /// Account password used for token login
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Returns true when an email and a password are both available
    #[must_use]
    pub fn has_login(&self) -> bool {
        matches!((&self.email, &self.password), (Some(e), Some(p)) if !e.is_empty() && !p.is_empty())
    }

    /// Returns true when an API key is available
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Checks that at least one usable authentication method is configured
    ///
    /// # Errors
    /// [`AppError::Authentication`] when neither an API key nor an
    /// email/password pair is present.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.has_api_key() || self.has_login() {
            Ok(())
        } else {
            Err(AppError::Authentication(
                "No authentication credentials provided. Set an API key or an email and password \
                 (NOTEDX_API_KEY, or NOTEDX_EMAIL and NOTEDX_PASSWORD)"
                    .to_string(),
            ))
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL for the NoteDx REST API, without trailing slash
    pub base_url: String,
    /// Timeout in seconds for a whole request
    pub timeout: u64,
    /// Timeout in seconds for establishing a connection
    pub connect_timeout: u64,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for client-side rate limiting of API requests
pub struct RateLimiterConfig {
    /// Maximum number of requests allowed per period
    pub max_requests: u32,
    /// Time period in seconds for the rate limit
    pub period_seconds: u64,
    /// Burst size - maximum number of requests that can be made at once
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            period_seconds: DEFAULT_RATE_LIMIT_PERIOD_SECONDS,
            burst_size: DEFAULT_RATE_LIMIT_BURST_SIZE,
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the NoteDx API client
pub struct Config {
    /// Authentication credentials
    pub credentials: Credentials,
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Retry policy for transient failures
    pub retry: RetryConfig,
    /// Rate limiter configuration for API requests
    pub rate_limiter: RateLimiterConfig,
    /// Log in immediately when the client is created with email/password
    pub auto_login: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from environment variables and an optional `.env` file
    ///
    /// Recognised variables: `NOTEDX_API_KEY`, `NOTEDX_EMAIL`, `NOTEDX_PASSWORD`,
    /// `NOTEDX_BASE_URL`, `NOTEDX_TIMEOUT`, `NOTEDX_CONNECT_TIMEOUT`,
    /// `NOTEDX_MAX_RETRIES`, `NOTEDX_RETRY_DELAY_MS`, `NOTEDX_RETRY_MAX_DELAY_MS`,
    /// `NOTEDX_RATE_LIMIT_MAX_REQUESTS`, `NOTEDX_RATE_LIMIT_PERIOD_SECONDS`,
    /// `NOTEDX_RATE_LIMIT_BURST_SIZE` and `NOTEDX_AUTO_LOGIN`.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let credentials = Credentials {
            api_key: get_env_or_none("NOTEDX_API_KEY"),
            email: get_env_or_none("NOTEDX_EMAIL"),
            password: get_env_or_none("NOTEDX_PASSWORD"),
        };

        if credentials.validate().is_err() {
            warn!("Neither NOTEDX_API_KEY nor NOTEDX_EMAIL/NOTEDX_PASSWORD found in environment");
        }

        Config {
            credentials,
            rest_api: RestApiConfig {
                base_url: normalize_base_url(&get_env("NOTEDX_BASE_URL", DEFAULT_BASE_URL)),
                timeout: get_env_or_default("NOTEDX_TIMEOUT", DEFAULT_TIMEOUT_SECS),
                connect_timeout: get_env_or_default(
                    "NOTEDX_CONNECT_TIMEOUT",
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                ),
            },
            retry: RetryConfig::default(),
            rate_limiter: RateLimiterConfig {
                max_requests: get_env_or_default(
                    "NOTEDX_RATE_LIMIT_MAX_REQUESTS",
                    DEFAULT_RATE_LIMIT_MAX_REQUESTS,
                ),
                period_seconds: get_env_or_default(
                    "NOTEDX_RATE_LIMIT_PERIOD_SECONDS",
                    DEFAULT_RATE_LIMIT_PERIOD_SECONDS,
                ),
                burst_size: get_env_or_default(
                    "NOTEDX_RATE_LIMIT_BURST_SIZE",
                    DEFAULT_RATE_LIMIT_BURST_SIZE,
                ),
            },
            auto_login: get_env_flag("NOTEDX_AUTO_LOGIN", true),
        }
    }

    /// Creates a configuration authenticating with an API key, without reading the environment
    pub fn with_api_key(base_url: &str, api_key: &str) -> Self {
        Self::from_parts(
            base_url,
            Credentials {
                api_key: Some(api_key.to_string()),
                ..Default::default()
            },
        )
    }

    /// Creates a configuration authenticating with email and password, without reading the environment
    pub fn with_credentials(base_url: &str, email: &str, password: &str) -> Self {
        Self::from_parts(
            base_url,
            Credentials {
                api_key: None,
                email: Some(email.to_string()),
                password: Some(password.to_string()),
            },
        )
    }

    fn from_parts(base_url: &str, credentials: Credentials) -> Self {
        Config {
            credentials,
            rest_api: RestApiConfig {
                base_url: normalize_base_url(base_url),
                ..Default::default()
            },
            retry: RetryConfig::standard(),
            rate_limiter: RateLimiterConfig::default(),
            auto_login: true,
        }
    }

    /// Replaces the retry policy
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Enables or disables login on client creation
    #[must_use]
    pub fn auto_login(mut self, auto_login: bool) -> Self {
        self.auto_login = auto_login;
        self
    }
}

/// Strips trailing slashes so paths can always be joined with a single `/`
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
