use crate::error::AppError;
use crate::model::requests::AccountUpdate;
use crate::model::responses::MessageResponse;
use crate::presentation::account::AccountInfo;
use async_trait::async_trait;

/// Interface for the account service
///
/// Every operation requires token (email/password) authentication.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Gets the company and contact details of the account
    async fn get_account(&self) -> Result<AccountInfo, AppError>;

    /// Updates the fields set in `update`
    ///
    /// # Arguments
    /// * `update` - Fields to change; at least one must be set
    async fn update_account(&self, update: &AccountUpdate) -> Result<MessageResponse, AppError>;

    /// Cancels the account
    async fn cancel_account(&self) -> Result<MessageResponse, AppError>;

    /// Reactivates a cancelled account
    async fn reactivate_account(&self) -> Result<MessageResponse, AppError>;
}
