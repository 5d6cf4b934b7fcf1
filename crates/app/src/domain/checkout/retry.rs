//! Bounded retry for transient store failures.

use std::time::Duration;

use tracing::warn;

use crate::domain::products::ProductsServiceError;

/// Fixed-backoff retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Total attempts (at least one) and the pause between them.
    #[must_use]
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Run `operation`, retrying while it fails with a transient error.
    ///
    /// # Errors
    ///
    /// Returns the first non-transient error, or the last error once attempts run out.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ProductsServiceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProductsServiceError>>,
    {
        let mut attempt = 1;

        loop {
            match operation().await {
                Err(error) if error.is_transient() && attempt < self.attempts => {
                    warn!(attempt, max_attempts = self.attempts, %error, "retrying store call");

                    tokio::time::sleep(self.backoff).await;

                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
