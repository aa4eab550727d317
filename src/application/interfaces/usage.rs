use crate::error::AppError;
use crate::presentation::usage::UsageReport;
use async_trait::async_trait;

/// Interface for usage reporting
#[async_trait]
pub trait UsageService: Send + Sync {
    /// Gets usage statistics between two months, inclusive
    ///
    /// # Arguments
    /// * `start_month` - First month, `YYYY-MM`
    /// * `end_month` - Last month, `YYYY-MM`
    ///
    /// When neither month is given both default to the current UTC month.
    async fn get_usage(
        &self,
        start_month: Option<&str>,
        end_month: Option<&str>,
    ) -> Result<UsageReport, AppError>;
}
