/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # NoteDx Client Prelude
//!
//! This module provides a convenient way to import the most commonly used types and traits
//! from the NoteDx client library. By importing this prelude, you get the client, its
//! configuration, every service trait and the request and response models.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notedx_client::prelude::*;
//!
//! let client = Client::new(Config::new()).await?;
//! let status = client.get_system_status().await?;
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the NoteDx API client
pub use crate::application::config::{Config, Credentials, RateLimiterConfig, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::{AppError, NoteDxResult};

// ============================================================================
// CLIENT, AUTHENTICATION AND SESSION MANAGEMENT
// ============================================================================

/// API client
pub use crate::application::client::Client;

/// Authentication handler and session
pub use crate::application::auth::{Auth, AuthMethod, Session};

// ============================================================================
// CORE SERVICES (TRAITS)
// ============================================================================

/// Service traits implemented by [`Client`]
pub use crate::application::interfaces::{
    account::AccountService, api_keys::KeyService, notes::NoteService, usage::UsageService,
    webhooks::WebhookService,
};

// ============================================================================
// MODELS
// ============================================================================

/// Request models
pub use crate::model::requests::{
    AccountUpdate, CreateAccountRequest, NoteRequest, RegenerateRequest, WebhookUpdate,
};

/// Response models
pub use crate::model::responses::{
    ApiKeyCreated, CreateAccountResponse, JobResponse, JobState, JobStatus, MessageResponse,
    NoteResponse, SystemStatus, TranscriptResponse,
};

/// Retry policy
pub use crate::model::retry::RetryConfig;

/// Account, key and webhook models
pub use crate::presentation::account::{
    AccountInfo, AccountStatus, ApiKeyInfo, KeyStatus, KeyType, WebhookSettings,
};

/// Note generation enumerations
pub use crate::presentation::note::{
    DocumentationStyle, Language, RecordingType, Template, VisitType,
};

/// Usage report models
pub use crate::presentation::usage::{
    ApiKeyUsage, CostBreakdown, MonthlyUsage, TokenUsage, UsagePeriod, UsageReport, UsageTotals,
};

// ============================================================================
// UTILITIES
// ============================================================================

/// Rate limiting utilities
pub use crate::application::rate_limiter::RateLimiter;

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Local validation helpers
pub use crate::utils::validation::{
    calculate_optimal_chunk_size, validate_audio_file, validate_month_format,
    validate_webhook_url,
};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};

/// Re-export reqwest for HTTP operations (if needed for custom implementations)
pub use reqwest::Method;
