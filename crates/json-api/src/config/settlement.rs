//! Settlement Config

use std::time::Duration;

use clap::Args;

use kasir_app::domain::checkout::RetryPolicy;

/// Retry settings for stock reads and writes during settlement.
#[derive(Debug, Args)]
pub struct SettlementConfig {
    /// Attempts per store call, including the first
    #[arg(long, env = "SETTLEMENT_RETRY_ATTEMPTS", default_value_t = 3_u32)]
    pub settlement_retry_attempts: u32,

    /// Pause between attempts, in milliseconds
    #[arg(long, env = "SETTLEMENT_RETRY_BACKOFF_MS", default_value_t = 200_u64)]
    pub settlement_retry_backoff_ms: u64,
}

impl SettlementConfig {
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.settlement_retry_attempts,
            Duration::from_millis(self.settlement_retry_backoff_ms),
        )
    }
}
