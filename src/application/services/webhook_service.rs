use crate::application::client::Client;
use crate::application::interfaces::webhooks::WebhookService;
use crate::error::AppError;
use crate::model::requests::WebhookUpdate;
use crate::model::responses::MessageResponse;
use crate::presentation::account::WebhookSettings;
use crate::utils::validation::validate_webhook_url;
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
impl WebhookService for Client {
    async fn get_webhook_settings(&self) -> Result<WebhookSettings, AppError> {
        self.ensure_token_auth().await?;
        debug!("Getting webhook settings");

        self.get("user/webhook").await
    }

    async fn update_webhook_settings(
        &self,
        webhook_dev: Option<&str>,
        webhook_prod: Option<&str>,
    ) -> Result<MessageResponse, AppError> {
        self.ensure_token_auth().await?;

        if webhook_dev.is_none() && webhook_prod.is_none() {
            return Err(AppError::invalid_field(
                "webhook",
                "At least one webhook URL must be provided",
            ));
        }
        if let Some(url) = webhook_dev {
            validate_webhook_url(url, false)?;
        }
        if let Some(url) = webhook_prod {
            validate_webhook_url(url, true)?;
        }

        info!("Updating webhook settings");
        let payload = WebhookUpdate {
            webhook_dev: webhook_dev.map(String::from),
            webhook_prod: webhook_prod.map(String::from),
        };
        self.post("user/webhook", Some(&payload)).await
    }
}
