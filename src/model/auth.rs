/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::application::auth::Session;
use crate::constants::DEFAULT_TOKEN_EXPIRES_IN_SECS;
use crate::presentation::serialization::{option_string_empty_as_none, string_as_u64_opt};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Body of the `auth/login` request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Account email
    pub email: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Body of the `auth/refresh` request
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    /// Refresh token obtained at login
    pub refresh_token: &'a str,
}

/// Token payload returned by `auth/login` and `auth/refresh`
///
/// The identity backend names the bearer token either `access_token` or
/// `id_token`; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Short-lived bearer token
    #[serde(alias = "id_token", alias = "idToken", alias = "accessToken")]
    pub access_token: String,
    /// Token used to obtain a new bearer token
    #[serde(
        default,
        alias = "refreshToken",
        deserialize_with = "option_string_empty_as_none"
    )]
    pub refresh_token: Option<String>,
    /// Lifetime of the bearer token in seconds
    #[serde(default, alias = "expiresIn", deserialize_with = "string_as_u64_opt")]
    pub expires_in: Option<u64>,
    /// Identifier of the authenticated user
    #[serde(default, alias = "userId", alias = "uid")]
    pub user_id: Option<String>,
    /// Email of the authenticated user
    #[serde(default)]
    pub email: Option<String>,
}

impl TokenResponse {
    /// Unix timestamp (seconds) at which the bearer token expires
    #[must_use]
    pub fn expires_at(&self) -> u64 {
        (Utc::now().timestamp().max(0) as u64).saturating_add(self.lifetime())
    }

    /// Lifetime of the bearer token in seconds, defaulting to one hour
    #[must_use]
    pub fn lifetime(&self) -> u64 {
        self.expires_in.unwrap_or(DEFAULT_TOKEN_EXPIRES_IN_SECS)
    }

    /// Converts the payload into a session
    ///
    /// `previous_refresh` is kept when a refresh response does not rotate the
    /// refresh token.
    #[must_use]
    pub fn into_session(self, previous_refresh: Option<String>) -> Session {
        let expires_at = self.expires_at();
        let expires_in = self.lifetime();
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            user_id: self.user_id,
            email: self.email,
            expires_at,
            expires_in,
        }
    }
}

impl From<TokenResponse> for Session {
    fn from(v: TokenResponse) -> Self {
        v.into_session(None)
    }
}
