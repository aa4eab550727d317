/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Rate limiter module for controlling API request rates
//!
//! This module provides client-side throttling using the `governor` crate so
//! bursts of calls spread out before the server answers `429`.

use crate::application::config::RateLimiterConfig;
use crate::constants::MAX_RATE_LIMIT_PERIOD_SECONDS;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Rate limiter for controlling API request rates
///
/// Uses the `governor` crate to implement a token bucket: `max_requests`
/// cells replenish evenly over `period_seconds`, with up to `burst_size`
/// requests allowed back to back.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl RateLimiter {
    /// Creates a new rate limiter from configuration
    ///
    /// A configuration with `max_requests == 0` disables throttling.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use notedx_client::application::config::RateLimiterConfig;
    /// use notedx_client::application::rate_limiter::RateLimiter;
    ///
    /// let config = RateLimiterConfig {
    ///     max_requests: 60,
    ///     period_seconds: 60,
    ///     burst_size: 10,
    /// };
    ///
    /// let limiter = RateLimiter::new(&config);
    /// ```
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Self {
        if config.max_requests == 0 {
            debug!("Client-side rate limiting disabled");
            return Self::unlimited();
        }

        let period_ms = config
            .period_seconds
            .clamp(1, MAX_RATE_LIMIT_PERIOD_SECONDS)
            .saturating_mul(1000);
        let replenish = Duration::from_millis((period_ms / u64::from(config.max_requests)).max(1));

        let burst_size = NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN);

        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst_size);

        Self {
            limiter: Some(Arc::new(GovernorRateLimiter::direct(quota))),
        }
    }

    /// Creates a limiter that never waits
    #[must_use]
    pub fn unlimited() -> Self {
        Self { limiter: None }
    }

    /// Waits until a request can be made according to the rate limit
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Checks if a request can be made immediately, consuming a cell when it can
    #[must_use]
    pub fn check(&self) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("enabled", &self.limiter.is_some())
            .finish()
    }
}
