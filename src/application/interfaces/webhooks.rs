use crate::error::AppError;
use crate::model::responses::MessageResponse;
use crate::presentation::account::WebhookSettings;
use async_trait::async_trait;

/// Interface for webhook configuration
///
/// Every operation requires token (email/password) authentication.
#[async_trait]
pub trait WebhookService: Send + Sync {
    /// Gets the configured webhook URLs
    async fn get_webhook_settings(&self) -> Result<WebhookSettings, AppError>;

    /// Sets the webhook URLs
    ///
    /// # Arguments
    /// * `webhook_dev` - Sandbox destination, `Some("")` removes it
    /// * `webhook_prod` - Live destination (HTTPS only), `Some("")` removes it
    ///
    /// `None` leaves a URL unchanged; at least one must be given.
    async fn update_webhook_settings(
        &self,
        webhook_dev: Option<&str>,
        webhook_prod: Option<&str>,
    ) -> Result<MessageResponse, AppError>;
}
