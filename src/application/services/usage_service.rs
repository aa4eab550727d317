use crate::application::client::Client;
use crate::application::interfaces::usage::UsageService;
use crate::error::AppError;
use crate::presentation::usage::UsageReport;
use crate::utils::validation::validate_month_format;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

/// Current UTC month as `YYYY-MM`
#[must_use]
pub fn current_month() -> String {
    Utc::now().format("%Y-%m").to_string()
}

/// Query parameters for `user/usage`
///
/// Months are validated; with neither given both default to the current
/// month.
pub(crate) fn usage_query(
    start_month: Option<&str>,
    end_month: Option<&str>,
) -> Result<Vec<(String, String)>, AppError> {
    let (start, end) = match (start_month, end_month) {
        (None, None) => {
            let month = current_month();
            (Some(month.clone()), Some(month))
        }
        (start, end) => (start.map(String::from), end.map(String::from)),
    };

    if let Some(start) = &start {
        validate_month_format(start, "start_month")?;
    }
    if let Some(end) = &end {
        validate_month_format(end, "end_month")?;
    }
    if let (Some(start), Some(end)) = (&start, &end) {
        // YYYY-MM sorts lexicographically
        if start > end {
            return Err(AppError::Validation(format!(
                "Invalid date range: start_month ({start}) must be <= end_month ({end})"
            )));
        }
    }

    let mut query = Vec::with_capacity(2);
    if let Some(start) = start {
        query.push(("start_month".to_string(), start));
    }
    if let Some(end) = end {
        query.push(("end_month".to_string(), end));
    }
    Ok(query)
}

#[async_trait]
impl UsageService for Client {
    async fn get_usage(
        &self,
        start_month: Option<&str>,
        end_month: Option<&str>,
    ) -> Result<UsageReport, AppError> {
        let query = usage_query(start_month, end_month)?;
        info!("Getting usage statistics");

        let report: UsageReport = self.get_with_query("user/usage", &query).await?;

        debug!(
            "Usage obtained for {}..{}: {} jobs",
            report.period.start_month, report.period.end_month, report.totals.jobs
        );
        Ok(report)
    }
}
