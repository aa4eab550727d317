use crate::application::client::Client;
use crate::application::interfaces::api_keys::KeyService;
use crate::error::AppError;
use crate::model::requests::{CreateKeyPayload, KeyMetadataPayload, KeyPayload, KeyStatusPayload};
use crate::model::responses::{ApiKeyCreated, MessageResponse};
use crate::presentation::account::{ApiKeyInfo, KeyStatus, KeyType};
use crate::utils::validation::validate_metadata;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info};

fn require_key(api_key: &str) -> Result<(), AppError> {
    if api_key.trim().is_empty() {
        Err(AppError::MissingField("api_key".to_string()))
    } else {
        Ok(())
    }
}

fn key_path(api_key: &str) -> String {
    format!("user/api-keys/{api_key}")
}

#[async_trait]
impl KeyService for Client {
    async fn list_api_keys(&self, show_full: bool) -> Result<Vec<ApiKeyInfo>, AppError> {
        self.ensure_token_auth().await?;
        debug!("Listing API keys (show_full: {})", show_full);

        let query = [("showFull".to_string(), show_full.to_string())];
        let keys: Vec<ApiKeyInfo> = self.get_with_query("user/list-api-keys", &query).await?;

        debug!("API keys obtained: {} keys", keys.len());
        Ok(keys)
    }

    async fn create_api_key(
        &self,
        key_type: KeyType,
        metadata: Option<&HashMap<String, String>>,
    ) -> Result<ApiKeyCreated, AppError> {
        self.ensure_token_auth().await?;
        if let Some(metadata) = metadata {
            if key_type != KeyType::Live {
                return Err(AppError::invalid_field(
                    "metadata",
                    "Metadata can only be set on live API keys",
                ));
            }
            validate_metadata(metadata)?;
        }
        info!("Creating {} API key", key_type);

        let payload = CreateKeyPayload { key_type, metadata };
        self.post("user/create-api-key", Some(&payload)).await
    }

    async fn update_metadata(
        &self,
        api_key: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<MessageResponse, AppError> {
        self.ensure_token_auth().await?;
        require_key(api_key)?;
        validate_metadata(metadata)?;
        info!("Updating API key metadata");

        let payload = KeyMetadataPayload { api_key, metadata };
        self.post("user/update-api-key-metadata", Some(&payload))
            .await
    }

    async fn update_status(
        &self,
        api_key: &str,
        status: KeyStatus,
    ) -> Result<MessageResponse, AppError> {
        self.ensure_token_auth().await?;
        require_key(api_key)?;
        info!("Setting API key status to {}", status);

        let payload = KeyStatusPayload { api_key, status };
        self.post(&format!("{}/status", key_path(api_key)), Some(&payload))
            .await
    }

    async fn delete_api_key(&self, api_key: &str) -> Result<MessageResponse, AppError> {
        self.ensure_token_auth().await?;
        require_key(api_key)?;
        info!("Deleting API key");

        let payload = KeyPayload { api_key };
        self.delete_with_body(&key_path(api_key), &payload).await
    }
}
