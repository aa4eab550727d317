/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Local precondition checks run before any request leaves the client

use crate::constants::{
    MAX_AUDIO_FILE_SIZE, MAX_CHUNK_SIZE, MAX_METADATA_ENTRIES, MAX_METADATA_KEY_LEN,
    MAX_METADATA_VALUE_LEN, MIN_CHUNK_SIZE, SUPPORTED_AUDIO_FORMATS, TARGET_CHUNK_COUNT,
};
use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Validates an audio file before upload and returns its size in bytes
///
/// Checks, in order: the path is an existing regular file, the extension is
/// supported, the size is within the 500MB limit, and the file can be read.
///
/// # Errors
/// Returns [`AppError::Validation`] describing the first failed check.
pub fn validate_audio_file(path: &Path) -> Result<u64, AppError> {
    if !path.is_file() {
        return Err(AppError::Validation(format!(
            "Audio file not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    if !SUPPORTED_AUDIO_FORMATS.contains(&extension.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported audio format: '{}'. Supported formats: {}",
            extension,
            SUPPORTED_AUDIO_FORMATS.join(", ")
        )));
    }

    let size = path
        .metadata()
        .map_err(|e| AppError::Validation(format!("Cannot read audio file: {e}")))?
        .len();
    if size > MAX_AUDIO_FILE_SIZE {
        return Err(AppError::Validation(format!(
            "File size exceeds 500MB limit: {} bytes",
            size
        )));
    }

    let mut first_byte = [0u8; 1];
    let read = File::open(path)
        .and_then(|mut f| f.read(&mut first_byte))
        .map_err(|e| AppError::Validation(format!("Cannot read audio file: {e}")))?;
    if read == 0 {
        return Err(AppError::Validation(format!(
            "Cannot read audio file: {} is empty",
            path.display()
        )));
    }

    debug!("Audio file validated: {} ({} bytes)", path.display(), size);
    Ok(size)
}

/// Chunk size used to stream an upload of `file_size` bytes
///
/// The file is split into roughly ten chunks, rounded up to a whole MiB and
/// clamped between 5 MiB and 50 MiB.
#[must_use]
pub fn calculate_optimal_chunk_size(file_size: u64) -> u64 {
    const MIB: u64 = 1024 * 1024;
    let target = file_size.div_ceil(TARGET_CHUNK_COUNT);
    let rounded = target.div_ceil(MIB).saturating_mul(MIB);
    rounded.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

/// MIME type sent with the presigned upload, derived from the file extension
#[must_use]
pub fn audio_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "mp3" | "mp2" => "audio/mpeg",
        "mp4" | "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "ogg" | "opus" => "audio/ogg",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}

/// Validates a `YYYY-MM` month string
///
/// # Arguments
/// * `month` - Value to check
/// * `param_name` - Parameter name used in the error message
pub fn validate_month_format(month: &str, param_name: &str) -> Result<(), AppError> {
    if MONTH_RE.is_match(month) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Invalid {param_name} format: '{month}'. Expected YYYY-MM"
        )))
    }
}

/// Validates a webhook URL
///
/// An empty string is accepted and means the webhook is removed. Any other
/// value must be an `http` or `https` URL with a host; when `require_https`
/// is set only `https` is accepted.
pub fn validate_webhook_url(url: &str, require_https: bool) -> Result<(), AppError> {
    if url.is_empty() {
        return Ok(());
    }

    let parsed = Url::parse(url)
        .map_err(|_| AppError::Validation(format!("Invalid webhook URL format: '{url}'")))?;

    let scheme = parsed.scheme();
    if (scheme != "http" && scheme != "https") || parsed.host_str().is_none() {
        return Err(AppError::Validation(format!(
            "Invalid webhook URL format: '{url}'"
        )));
    }

    if require_https && scheme != "https" {
        return Err(AppError::Validation(format!(
            "Production webhook URL must use HTTPS: '{url}'"
        )));
    }

    Ok(())
}

/// Validates an email address with a pragmatic pattern
pub fn validate_email(email: &str, field: &str) -> Result<(), AppError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AppError::invalid_field(
            field,
            format!("Invalid email address for {field}: '{email}'"),
        ))
    }
}

/// Validates metadata attached to an API key
pub fn validate_metadata(metadata: &HashMap<String, String>) -> Result<(), AppError> {
    if metadata.len() > MAX_METADATA_ENTRIES {
        return Err(AppError::invalid_field(
            "metadata",
            format!("Metadata cannot have more than {MAX_METADATA_ENTRIES} entries"),
        ));
    }
    for (key, value) in metadata {
        if key.is_empty() || key.chars().count() > MAX_METADATA_KEY_LEN {
            return Err(AppError::invalid_field(
                "metadata",
                format!("Metadata keys must be between 1 and {MAX_METADATA_KEY_LEN} characters"),
            ));
        }
        if value.chars().count() > MAX_METADATA_VALUE_LEN {
            return Err(AppError::invalid_field(
                "metadata",
                format!(
                    "Metadata value for '{key}' exceeds {MAX_METADATA_VALUE_LEN} characters"
                ),
            ));
        }
    }
    Ok(())
}
