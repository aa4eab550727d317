/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! HTTP execution layer
//!
//! Sends requests with rate limiting and retry, maps error statuses to
//! [`AppError`] variants and decodes response bodies.

use crate::application::auth::AuthMethod;
use crate::application::rate_limiter::RateLimiter;
use crate::error::AppError;
use crate::model::retry::RetryConfig;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Body, Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;
use tokio_util::io::ReaderStream;
use tracing::{debug, error, warn};

/// Joins a base URL and an endpoint path with exactly one `/`
///
/// `test`, `/test`, `/test/` and `test/` all resolve to `<base>/test`.
/// Absolute `http(s)://` paths are returned unchanged.
#[must_use]
pub fn build_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Builds the default request headers
///
/// A bearer token takes precedence over the API key; with neither only the
/// content type is set.
#[must_use]
pub fn build_headers(token: Option<&str>, api_key: Option<&str>) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    } else if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        headers.push(("X-Api-Key".to_string(), key.to_string()));
    }
    headers
}

/// Extracts a human readable message from an error body
///
/// Looks at `message`, `detail` and `error` in that order; each may be a
/// string or an object carrying its own `message`. Falls back to the raw
/// text, then to the status reason.
#[must_use]
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "detail", "error"] {
            match map.get(key) {
                Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(Value::Object(inner)) => {
                    if let Some(Value::String(s)) = inner.get("message") {
                        return s.clone();
                    }
                }
                _ => {}
            }
        }
    }
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

/// An inactive account is flagged by the body code, or by a message naming the account
///
/// Inactive API keys also answer `403` and must stay authorization errors.
fn is_inactive_account(body: &str, message: &str) -> bool {
    let code = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.pointer("/error/code")
            .or_else(|| v.get("code"))
            .and_then(Value::as_str)
            .map(str::to_ascii_uppercase)
    });
    match code.as_deref() {
        Some("ACCOUNT_INACTIVE" | "INACTIVE_ACCOUNT" | "INACTIVE") => true,
        Some(_) => false,
        None => message.to_ascii_lowercase().contains("account is inactive"),
    }
}

/// Maps a non-success response onto the error hierarchy
///
/// # Arguments
/// * `status` - HTTP status returned by the server
/// * `body` - Raw response body
/// * `auth` - Authentication method used for the request, which changes the
///   wording of 401/403 messages
#[must_use]
pub fn map_error_response(status: StatusCode, body: &str, auth: AuthMethod) -> AppError {
    let message = extract_error_message(status, body);
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::BadRequest(message),
        StatusCode::UNAUTHORIZED => match auth {
            AuthMethod::ApiKey => AppError::Authentication(format!("Invalid API key: {message}")),
            _ => AppError::Authentication(format!("Authentication failed: {message}")),
        },
        StatusCode::PAYMENT_REQUIRED => {
            AppError::PaymentRequired(format!("Payment required: {message}"))
        }
        StatusCode::FORBIDDEN => {
            if is_inactive_account(body, &message) {
                AppError::InactiveAccount(format!("Account is inactive: {message}"))
            } else {
                match auth {
                    AuthMethod::ApiKey => AppError::Authorization(format!(
                        "API key does not have required permissions: {message}"
                    )),
                    _ => AppError::Authorization(format!("Forbidden: {message}")),
                }
            }
        }
        StatusCode::NOT_FOUND => AppError::NotFound(format!("Resource not found: {message}")),
        StatusCode::TOO_MANY_REQUESTS => AppError::RateLimitExceeded {
            message: format!("Rate limit exceeded: {message}"),
            retry_after: None,
        },
        StatusCode::SERVICE_UNAVAILABLE => {
            AppError::ServiceUnavailable(format!("Server error: {message}"))
        }
        s if s.is_server_error() => AppError::InternalServer(format!("Server error: {message}")),
        _ => AppError::Api { status, message },
    }
}

/// Decodes a success body into `T`
///
/// An empty body decodes from `{}` and a non-JSON body from
/// `{"detail": <text>}`, so callers asking for [`Value`] always get an object.
///
/// # Errors
/// [`AppError::BadRequest`] with `Invalid response format` when the body
/// cannot be turned into `T`.
pub fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    let trimmed = text.trim();
    let value = if trimmed.is_empty() {
        json!({})
    } else {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(v) => v,
            Err(_) => json!({ "detail": trimmed }),
        }
    };
    serde_json::from_value::<T>(value).map_err(|e| {
        let preview: String = trimmed.chars().take(200).collect();
        AppError::BadRequest(format!("Invalid response format: {e} (body: {preview})"))
    })
}

/// Reads a success response and decodes it into `T`
pub async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let text = response.text().await?;
    parse_body(&text)
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn is_transient_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Makes an HTTP request with rate limiting, retry and error mapping
///
/// Connection errors, timeouts, `429` and `500/502/503/504` are retried with
/// exponential backoff; a numeric `Retry-After` header overrides the backoff
/// (capped at the configured maximum delay). A `401` received while sending a
/// bearer token yields [`AppError::TokenExpired`] so the caller can refresh.
/// Every other non-success status is mapped with [`map_error_response`].
///
/// # Arguments
///
/// * `client` - The HTTP client to use for the request
/// * `rate_limiter` - Shared rate limiter to control request rate
/// * `method` - HTTP method
/// * `url` - Full URL to request
/// * `headers` - `(name, value)` pairs added to the request
/// * `query` - Query string parameters
/// * `body` - Optional request body, serialized as JSON
/// * `retry_config` - Retry policy
/// * `auth` - Authentication method carried by `headers`
///
/// # Example
///
/// ```ignore
/// let headers = build_headers(None, Some("my-key"));
/// let response = make_http_request(
///     &client,
///     &rate_limiter,
///     Method::GET,
///     "https://api.notedx.io/v1/system/status",
///     &headers,
///     &[],
///     None::<&()>,
///     &RetryConfig::with_max_retries(3),
///     AuthMethod::ApiKey,
/// ).await?;
/// ```
#[allow(clippy::too_many_arguments)]
pub async fn make_http_request<B: Serialize + ?Sized>(
    client: &Client,
    rate_limiter: &RateLimiter,
    method: Method,
    url: &str,
    headers: &[(String, String)],
    query: &[(String, String)],
    body: Option<&B>,
    retry_config: &RetryConfig,
    auth: AuthMethod,
) -> Result<Response, AppError> {
    let max_retries = retry_config.max_retries();
    let mut attempt: u32 = 0;

    loop {
        rate_limiter.wait().await;

        debug!("{} {} (attempt {})", method, url, attempt + 1);

        let mut request = client.request(method.clone(), url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let transient = e.is_connect() || e.is_timeout();
                let err = AppError::from(e);
                if transient && attempt < max_retries {
                    let delay = retry_config.delay(attempt);
                    warn!(
                        "{} (attempt {}/{}), retrying in {:?}",
                        err,
                        attempt + 1,
                        max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                error!("{} {} failed: {}", method, url, err);
                return Err(err);
            }
        };

        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after_secs(&response);
            if attempt < max_retries {
                let delay = match retry_after {
                    Some(secs) => Duration::from_secs(secs)
                        .min(Duration::from_millis(retry_config.max_delay_ms)),
                    None => retry_config.delay(attempt),
                };
                warn!(
                    "Rate limit exceeded (attempt {}/{}). Waiting {:?} before retry...",
                    attempt + 1,
                    max_retries + 1,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }
            let body_text = response.text().await.unwrap_or_default();
            error!(
                "Rate limit exceeded after {} attempts: {}",
                attempt + 1,
                body_text
            );
            return Err(AppError::RateLimitExceeded {
                message: format!(
                    "Rate limit exceeded: {}",
                    extract_error_message(status, &body_text)
                ),
                retry_after,
            });
        }

        if is_transient_status(status) && attempt < max_retries {
            let delay = retry_config.delay(attempt);
            warn!(
                "Server returned {} (attempt {}/{}), retrying in {:?}",
                status,
                attempt + 1,
                max_retries + 1,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
            continue;
        }

        let body_text = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED && auth == AuthMethod::Token {
            warn!("Bearer token rejected: {}", body_text);
            return Err(AppError::TokenExpired);
        }

        error!("Request failed with status {}: {}", status, body_text);
        return Err(map_error_response(status, &body_text, auth));
    }
}

async fn file_body(path: &Path, chunk_size: u64) -> Result<Body, AppError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| AppError::Upload(format!("Cannot open audio file: {e}")))?;
    let capacity = usize::try_from(chunk_size.max(1)).unwrap_or(usize::MAX);
    Ok(Body::wrap_stream(ReaderStream::with_capacity(file, capacity)))
}

/// Uploads a file to a presigned URL with `PUT`
///
/// The file is streamed from disk in `chunk_size` reads and reopened for
/// every attempt. No authentication headers are sent: the URL itself
/// carries the grant. Transport errors and transient server statuses are
/// retried.
///
/// # Errors
/// [`AppError::Upload`] when storage rejects the file, [`AppError::Network`]
/// when the transfer keeps failing.
pub async fn upload_file(
    client: &Client,
    url: &str,
    path: &Path,
    size: u64,
    chunk_size: u64,
    content_type: &str,
    retry_config: &RetryConfig,
) -> Result<(), AppError> {
    let max_retries = retry_config.max_retries();
    let mut attempt: u32 = 0;

    loop {
        let body = file_body(path, chunk_size).await?;
        debug!(
            "PUT presigned upload ({} bytes in chunks of {}, attempt {})",
            size,
            chunk_size,
            attempt + 1
        );

        let result = client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, size)
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!("Upload completed with status {}", response.status());
                return Ok(());
            }
            Ok(response) => {
                let status = response.status();
                if is_transient_status(status) && attempt < max_retries {
                    let delay = retry_config.delay(attempt);
                    warn!("Upload returned {}, retrying in {:?}", status, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                let body = response.text().await.unwrap_or_default();
                error!("Upload failed with status {}: {}", status, body);
                return Err(AppError::Upload(format!(
                    "Failed to upload audio file (HTTP {}): {}",
                    status.as_u16(),
                    extract_error_message(status, &body)
                )));
            }
            Err(e) => {
                let transient = e.is_connect() || e.is_timeout();
                let err = AppError::from(e);
                if transient && attempt < max_retries {
                    let delay = retry_config.delay(attempt);
                    warn!("Upload {}, retrying in {:?}", err, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                error!("Upload failed: {}", err);
                return Err(err);
            }
        }
    }
}
