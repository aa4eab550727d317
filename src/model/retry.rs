/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_MAX_DELAY_MS,
};
use crate::utils::config::get_env_or_default;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for HTTP request retry behavior
///
/// Delays grow exponentially from `base_delay_ms` and are capped at
/// `max_delay_ms`. With `jitter` enabled up to 20% extra is added to each
/// delay so concurrent clients do not retry in lockstep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt (0 = no retries)
    pub max_retries: u32,
    /// Delay in milliseconds before the first retry
    pub base_delay_ms: u64,
    /// Upper bound in milliseconds for a single delay
    pub max_delay_ms: u64,
    /// Add random jitter to each delay
    pub jitter: bool,
}

impl RetryConfig {
    /// Creates a retry configuration from environment variables or defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the default retry configuration without reading the environment
    #[must_use]
    pub fn standard() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
            jitter: true,
        }
    }

    /// Creates a configuration that never retries
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::standard()
        }
    }

    /// Creates a new retry configuration with a maximum number of retries
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::standard()
        }
    }

    /// Creates a new retry configuration with custom base delay in milliseconds
    #[must_use]
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            base_delay_ms: delay_ms,
            ..Self::standard()
        }
    }

    /// Creates a new retry configuration with both max retries and custom base delay
    ///
    /// Jitter is disabled so delays are predictable.
    #[must_use]
    pub fn with_max_retries_and_delay(max_retries: u32, delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms: delay_ms,
            max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS.max(delay_ms),
            jitter: false,
        }
    }

    /// Gets the maximum retry count
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Backoff delay before retry number `attempt` (0-based), without jitter
    #[must_use]
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.min(20));
        let delay = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(delay)
    }

    /// Backoff delay before retry number `attempt` (0-based), jitter included
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        if !self.jitter || base.is_zero() {
            return base;
        }
        let max_extra = (base.as_millis() as u64) / 5;
        let extra = rand::rng().random_range(0..=max_extra);
        base + Duration::from_millis(extra)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: get_env_or_default("NOTEDX_MAX_RETRIES", DEFAULT_MAX_RETRIES),
            base_delay_ms: get_env_or_default("NOTEDX_RETRY_DELAY_MS", DEFAULT_RETRY_BASE_DELAY_MS),
            max_delay_ms: get_env_or_default(
                "NOTEDX_RETRY_MAX_DELAY_MS",
                DEFAULT_RETRY_MAX_DELAY_MS,
            ),
            jitter: true,
        }
    }
}
