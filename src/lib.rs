/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # NoteDx Client
//!
//! Async Rust client for the NoteDx API, a service that turns medical audio
//! recordings into transcripts and structured clinical notes.
//!
//! The crate is organised around a single [`application::client::Client`] that
//! owns credentials, session tokens and the HTTP transport. Every request goes
//! through the same pipeline:
//!
//! - authentication headers (bearer token or `X-Api-Key`)
//! - client-side rate limiting
//! - retry with exponential backoff on transient failures
//! - transparent token refresh when the server answers `401`
//! - mapping of error statuses to [`error::AppError`]
//!
//! Resource operations (notes, account, API keys, usage, webhooks) are exposed
//! as async traits in [`application::interfaces`] implemented by the client.
//!
//! ## Example
//!
//! ```ignore
//! use notedx_client::prelude::*;
//! use std::path::Path;
//!
//! let config = Config::with_api_key("https://api.notedx.io/v1", "my-key");
//! let client = Client::new(config).await?;
//!
//! let request = NoteRequest::new(Template::PrimaryCare)
//!     .with_visit_type(VisitType::InitialEncounter)
//!     .with_recording_type(RecordingType::Dictation);
//! let job = client.process_audio(Path::new("visit.mp3"), &request).await?;
//! let status = client.fetch_status(&job.job_id).await?;
//! ```

/// Client, authentication, configuration and resource services
pub mod application;
/// Library-wide constants
pub mod constants;
/// Error types
pub mod error;
/// Request and response models, HTTP execution and retry policy
pub mod model;
/// Convenient re-exports
pub mod prelude;
/// Domain enumerations shown to library users
pub mod presentation;
/// Environment, logging and validation helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
