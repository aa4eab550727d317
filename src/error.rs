/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error hierarchy for the NoteDx client
//!
//! Every failure surfaced by the crate is an [`AppError`]. HTTP statuses are
//! mapped onto dedicated variants by [`crate::model::http::map_error_response`],
//! local validation produces [`AppError::Validation`], [`AppError::MissingField`]
//! or [`AppError::InvalidField`], and transport failures become
//! [`AppError::Network`].

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used across the crate
pub type NoteDxResult<T> = Result<T, AppError>;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum AppError {
    /// Credentials missing or rejected (HTTP 401)
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Authenticated but not allowed to perform the operation (HTTP 403)
    #[error("authorization error: {0}")]
    Authorization(String),

    /// The account is inactive or cancelled
    #[error("inactive account: {0}")]
    InactiveAccount(String),

    /// Billing problem on the account (HTTP 402)
    #[error("payment required: {0}")]
    PaymentRequired(String),

    /// Resource does not exist (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Request rejected by the server or unparsable response
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Too many requests (HTTP 429), after retries were exhausted
    #[error("rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Server message
        message: String,
        /// Seconds suggested by the `Retry-After` header, if any
        retry_after: Option<u64>,
    },

    /// Server-side failure (HTTP 500, 502, 504)
    #[error("internal server error: {0}")]
    InternalServer(String),

    /// Service temporarily down (HTTP 503)
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Connection failure, timeout or other transport error
    #[error("network error: {0}")]
    Network(String),

    /// Local validation failure
    #[error("validation error: {0}")]
    Validation(String),

    /// A required field was not supplied
    #[error("missing field: {0}")]
    MissingField(String),

    /// A field value is outside its allowed set
    #[error("invalid field {field}: {message}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// Human readable explanation
        message: String,
    },

    /// Uploading audio to the presigned URL failed
    #[error("upload error: {0}")]
    Upload(String),

    /// The job id is unknown to the server
    #[error("job not found: {0}")]
    JobNotFound(String),

    /// The job exists but cannot serve the requested operation
    #[error("job error: {0}")]
    Job(String),

    /// Any other non-success status
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status returned by the server
        status: StatusCode,
        /// Server message
        message: String,
    },

    /// Bearer token rejected; consumed internally to trigger a refresh
    #[error("token expired")]
    TokenExpired,

    /// JSON (de)serialization failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Builds an [`AppError::InvalidField`]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds an [`AppError::MissingField`] with the canonical message
    pub fn missing_field(field: &str) -> Self {
        AppError::MissingField(format!("Missing required field: {field}"))
    }

    /// HTTP status associated with this error, when there is one
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            AppError::Authentication(_) | AppError::TokenExpired => Some(StatusCode::UNAUTHORIZED),
            AppError::Authorization(_) | AppError::InactiveAccount(_) => {
                Some(StatusCode::FORBIDDEN)
            }
            AppError::PaymentRequired(_) => Some(StatusCode::PAYMENT_REQUIRED),
            AppError::NotFound(_) | AppError::JobNotFound(_) => Some(StatusCode::NOT_FOUND),
            AppError::BadRequest(_) => Some(StatusCode::BAD_REQUEST),
            AppError::RateLimitExceeded { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            AppError::InternalServer(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::ServiceUnavailable(_) => Some(StatusCode::SERVICE_UNAVAILABLE),
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether repeating the same request may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Network(_)
                | AppError::RateLimitExceeded { .. }
                | AppError::InternalServer(_)
                | AppError::ServiceUnavailable(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Network(format!("Request timed out: {e}"))
        } else if e.is_connect() {
            AppError::Network(format!("Connection error: {e}"))
        } else if e.is_decode() {
            AppError::BadRequest(format!("Invalid response format: {e}"))
        } else {
            AppError::Network(format!("Request failed: {e}"))
        }
    }
}
