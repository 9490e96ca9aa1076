//! Service configuration.

use std::time::Duration;

use serde::Deserialize;

/// Retry policy for optimistic-lock conflicts on the stock ledger.
///
/// Only version conflicts are retried; business-rule failures surface
/// immediately. Attempt `n` (1-based) waits `n * base_delay_ms` before the
/// next read-mutate-write round.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum write attempts per logical operation.
    pub max_attempts: u32,
    /// Base backoff unit in milliseconds.
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 10,
        }
    }
}

impl RetryPolicy {
    /// Linearly increasing backoff for the given (1-based) attempt.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.base_delay_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Stock-related tunables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StockSettings {
    pub retry: RetryPolicy,
    /// Available quantities strictly below this classify as low stock.
    pub low_stock_threshold: u32,
}

impl Default for StockSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            low_stock_threshold: 10,
        }
    }
}
