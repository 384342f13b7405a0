//! Capped exponential backoff for the startup connection.
//!
//! The API is usually started next to its database (compose, k8s), so the
//! first few connection attempts may race the server coming up.

use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// How often and how patiently to retry a failing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Total attempts including the first one
    pub attempts: u32,
    pub first_delay: Duration,
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            attempts: 5,
            first_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
        }
    }
}

/// Outcome of a retried operation that never succeeded
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub waited: Duration,
    pub last_error: E,
}

impl Backoff {
    pub fn new(attempts: u32, first_delay: Duration, max_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            first_delay,
            max_delay,
        }
    }

    /// Delay to sleep after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.first_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Run `op` until it succeeds or the attempts run out.
    pub async fn run<F, Fut, T, E>(&self, what: &str, mut op: F) -> Result<T, Exhausted<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut waited = Duration::ZERO;
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(attempt, "{} succeeded after retrying", what);
                    }
                    return Ok(value);
                }
                Err(last_error) if attempt >= self.attempts => {
                    warn!(attempt, error = %last_error, "{} failed, giving up", what);
                    return Err(Exhausted {
                        attempts: attempt,
                        waited,
                        last_error,
                    });
                }
                Err(e) => {
                    let delay = self.delay_after(attempt);
                    warn!(attempt, ?delay, error = %e, "{} failed, retrying", what);
                    tokio::time::sleep(delay).await;
                    waited += delay;
                    attempt += 1;
                }
            }
        }
    }
}
