//! Mock gym listing with artificial latency and random failures.

use crate::catalog;
use crate::errors::StoreError;
use crate::models::Gym;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct ListingConfig {
    pub delay: Duration,
    /// Probability in `0.0..=1.0` that a fetch fails.
    pub failure_rate: f64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }
}

pub async fn fetch_gyms(config: &ListingConfig) -> Result<Vec<Gym>, StoreError> {
    if !config.delay.is_zero() {
        sleep(config.delay).await;
    }

    if roll_failure(config.failure_rate) {
        warn!(failure_rate = config.failure_rate, "simulated listing failure");
        return Err(StoreError::ListingFetchFailure);
    }

    Ok(catalog::gyms())
}

fn roll_failure(rate: f64) -> bool {
    rate > 0.0 && rand::rng().random::<f64>() < rate
}
