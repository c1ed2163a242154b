use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::config::RetryConfig;
use crate::errors::ClusterError;

/// Errors that can tell whether another attempt makes sense.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for ClusterError {
    fn is_retryable(&self) -> bool {
        ClusterError::is_retryable(self)
    }
}

/// Exponential backoff with jitter, capped at `max_delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    min_delay: Duration,
    max_delay: Duration,
    max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            max_retries: config.max_retries,
        }
    }
}

impl RetryPolicy {
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before retry number `retry` (1-based): `min * 2^(retry-1)`
    /// shifted by up to half of `min` either way.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let min = self.min_delay.as_secs_f64();
        let exponent = retry.saturating_sub(1).min(62) as i32;
        let jitter = rand::random::<f64>() * min - min / 2.0;
        let nap = (min * 2f64.powi(exponent) + jitter).max(0.0);

        if nap >= self.max_delay.as_secs_f64() {
            self.max_delay
        } else {
            Duration::from_secs_f64(nap)
        }
    }

    pub async fn execute<F, Fut, T, E>(&self, operation_name: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + std::fmt::Display,
    {
        let mut retry = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if retry >= self.max_retries => {
                    warn!(
                        "{} failed after {} retries: {}",
                        operation_name, self.max_retries, err
                    );
                    return Err(err);
                }
                Err(err) => {
                    retry += 1;
                    let delay = self.delay_for(retry);
                    warn!(
                        "{} failed (retry {}/{} in {:?}): {}",
                        operation_name, retry, self.max_retries, delay, err
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}
