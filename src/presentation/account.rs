/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::error::AppError;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a NoteDx account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account can use every endpoint
    #[default]
    Active,
    /// Account was deactivated by the owner or for billing reasons
    Inactive,
    /// Account was cancelled and can be reactivated
    Cancelled,
    /// Cancellation requested, effective at the end of the billing period
    CancelledPending,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

/// Account information returned by `user/account/info`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AccountInfo {
    /// Company owning the account
    #[serde(default)]
    pub company_name: Option<String>,
    /// Contact email for billing and notices
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Current account status
    #[serde(default)]
    pub account_status: AccountStatus,
    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Fields not modelled explicitly
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Environment an API key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Test key, jobs are not billed
    Sandbox,
    /// Production key
    Live,
}

impl KeyType {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Sandbox => "sandbox",
            KeyType::Live => "live",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(KeyType::Sandbox),
            "live" => Ok(KeyType::Live),
            _ => Err(AppError::invalid_field(
                "key_type",
                "Invalid value for key_type. Must be one of: sandbox, live",
            )),
        }
    }
}

/// Whether an API key can be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    /// Key accepted by the API
    Active,
    /// Key rejected by the API until reactivated
    Inactive,
}

impl KeyStatus {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyStatus::Active => "active",
            KeyStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(KeyStatus::Active),
            "inactive" => Ok(KeyStatus::Inactive),
            _ => Err(AppError::invalid_field(
                "status",
                "Invalid value for status. Must be one of: active, inactive",
            )),
        }
    }
}

/// An API key as listed by `user/list-api-keys`
///
/// The key itself is masked unless the listing asked for full details.
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiKeyInfo {
    /// Key value, possibly masked
    #[serde(alias = "api_key", alias = "apiKey")]
    pub key: String,
    /// Environment of the key
    #[serde(rename = "type", alias = "key_type", alias = "keyType")]
    pub key_type: KeyType,
    /// Current status
    pub status: KeyStatus,
    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last time the key authenticated a request
    #[serde(default)]
    pub last_used: Option<String>,
    /// Free-form metadata (live keys only)
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

/// Webhook destinations configured for the account
///
/// Job status changes are posted to these URLs.
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WebhookSettings {
    /// Destination for sandbox jobs
    #[serde(default)]
    pub webhook_dev: Option<String>,
    /// Destination for live jobs, always HTTPS
    #[serde(default)]
    pub webhook_prod: Option<String>,
}
