/// Default base URL of the NoteDx REST API
pub const DEFAULT_BASE_URL: &str = "https://api.notedx.io/v1";
/// User agent string sent with every request
pub const USER_AGENT: &str = concat!("notedx-client/", env!("CARGO_PKG_VERSION"));
/// Default request timeout in seconds (uploads can be large)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default number of retries for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Base delay in milliseconds for exponential backoff
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;
/// Upper bound in milliseconds for a single backoff delay
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 30_000;

/// Default requests allowed per rate limiter period
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 60;
/// Default rate limiter period in seconds
pub const DEFAULT_RATE_LIMIT_PERIOD_SECONDS: u64 = 60;
/// Default rate limiter burst size
pub const DEFAULT_RATE_LIMIT_BURST_SIZE: u32 = 10;
/// Longest rate limiter period accepted, longer periods are clamped
pub const MAX_RATE_LIMIT_PERIOD_SECONDS: u64 = 86_400;

/// Token lifetime assumed when the login response does not carry `expires_in`
pub const DEFAULT_TOKEN_EXPIRES_IN_SECS: u64 = 3600;
/// Tokens expiring within this many seconds are refreshed before use
pub const TOKEN_REFRESH_MARGIN_SECS: u64 = 300;

/// Maximum accepted audio file size in bytes (500 MB)
pub const MAX_AUDIO_FILE_SIZE: u64 = 500 * 1024 * 1024;
/// Smallest upload chunk in bytes (5 MiB)
pub const MIN_CHUNK_SIZE: u64 = 5 * 1024 * 1024;
/// Largest upload chunk in bytes (50 MiB)
pub const MAX_CHUNK_SIZE: u64 = 50 * 1024 * 1024;
/// Number of chunks an upload is split into before clamping
pub const TARGET_CHUNK_COUNT: u64 = 10;
/// Audio file extensions accepted by the API (lowercase, with leading dot)
pub const SUPPORTED_AUDIO_FORMATS: &[&str] = &[
    ".mp3", ".mp4", ".mp2", ".m4a", ".aac", ".wav", ".flac", ".pcm", ".ogg", ".opus", ".webm",
];

/// Maximum number of metadata entries attached to an API key
pub const MAX_METADATA_ENTRIES: usize = 10;
/// Maximum length of an API key metadata key
pub const MAX_METADATA_KEY_LEN: usize = 40;
/// Maximum length of an API key metadata value
pub const MAX_METADATA_VALUE_LEN: usize = 500;

/// Message returned when an operation needs an email/password session
pub const FIREBASE_AUTH_REQUIRED: &str = "This operation requires Firebase authentication (email/password). API key authentication is not supported.";
