use crate::application::client::Client;
use crate::application::interfaces::account::AccountService;
use crate::error::AppError;
use crate::model::requests::AccountUpdate;
use crate::model::responses::MessageResponse;
use crate::presentation::account::AccountInfo;
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
impl AccountService for Client {
    async fn get_account(&self) -> Result<AccountInfo, AppError> {
        self.ensure_token_auth().await?;
        debug!("Getting account information");

        let result: AccountInfo = self.get("user/account/info").await?;

        debug!(
            "Account information obtained: {}",
            result.company_name.as_deref().unwrap_or("<unnamed>")
        );
        Ok(result)
    }

    async fn update_account(&self, update: &AccountUpdate) -> Result<MessageResponse, AppError> {
        self.ensure_token_auth().await?;
        update.validate()?;
        info!("Updating account information");

        self.post("user/account/update", Some(update)).await
    }

    async fn cancel_account(&self) -> Result<MessageResponse, AppError> {
        self.ensure_token_auth().await?;
        info!("Cancelling account");

        self.post::<(), _>("user/cancel-account", None).await
    }

    async fn reactivate_account(&self) -> Result<MessageResponse, AppError> {
        self.ensure_token_auth().await?;
        info!("Reactivating account");

        self.post::<(), _>("user/reactivate-account", None).await
    }
}
