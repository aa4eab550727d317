use crate::error::AppError;
use crate::model::responses::{ApiKeyCreated, MessageResponse};
use crate::presentation::account::{ApiKeyInfo, KeyStatus, KeyType};
use async_trait::async_trait;
use std::collections::HashMap;

/// Interface for API key management
///
/// Every operation requires token (email/password) authentication.
#[async_trait]
pub trait KeyService: Send + Sync {
    /// Lists the API keys of the account
    ///
    /// # Arguments
    /// * `show_full` - Return unmasked keys
    async fn list_api_keys(&self, show_full: bool) -> Result<Vec<ApiKeyInfo>, AppError>;

    /// Creates an API key
    ///
    /// # Arguments
    /// * `key_type` - Sandbox or live
    /// * `metadata` - Optional metadata, accepted for live keys only
    async fn create_api_key(
        &self,
        key_type: KeyType,
        metadata: Option<&HashMap<String, String>>,
    ) -> Result<ApiKeyCreated, AppError>;

    /// Replaces the metadata of a live key
    async fn update_metadata(
        &self,
        api_key: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<MessageResponse, AppError>;

    /// Activates or deactivates a key
    async fn update_status(
        &self,
        api_key: &str,
        status: KeyStatus,
    ) -> Result<MessageResponse, AppError>;

    /// Permanently deletes a key
    async fn delete_api_key(&self, api_key: &str) -> Result<MessageResponse, AppError>;
}
