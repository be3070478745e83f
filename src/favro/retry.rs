//! Retry and backoff policy for the API transport
//!
//! The policy is pure: it only answers "retry after how long, or give up?".
//! The transport's request loop owns the sleeping and the counting.

use std::time::Duration;

use crate::config::retry as retry_config;

/// What the request loop should do after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given delay and send the request again
    Retry(Duration),
    /// Stop and surface the last error
    GiveUp,
}

/// Bounded retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts for 429/5xx streaks, first attempt included
    pub max_attempts: u32,
    /// Delay before the first retry, doubled on each following retry
    pub base_delay: Duration,
    /// Upper bound for any single backoff delay
    pub max_delay: Duration,
    /// Fixed delay before the single retry of a transient network failure
    pub transient_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry_config::MAX_ATTEMPTS,
            base_delay: Duration::from_millis(retry_config::BASE_DELAY_MS),
            max_delay: Duration::from_millis(retry_config::MAX_DELAY_MS),
            transient_delay: Duration::from_millis(retry_config::TRANSIENT_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Policy with custom delays and the default attempt budget
    pub fn with_delays(base_delay: Duration, max_delay: Duration, transient_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay,
            transient_delay,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Exponential delay before retry number `retry` (1-based), capped at `max_delay`
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }

    /// Decision after the `attempt`-th consecutive 429 or 5xx response.
    ///
    /// A server-suggested `retry_after` longer than the computed backoff is
    /// honored, still capped at `max_delay`.
    pub fn on_throttled(&self, attempt: u32, retry_after: Option<Duration>) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::GiveUp;
        }
        let delay = self.backoff(attempt);
        let delay = retry_after
            .map_or(delay, |after| delay.max(after))
            .min(self.max_delay);
        RetryDecision::Retry(delay)
    }

    /// Decision after `consecutive` transient network failures in a row.
    /// Only the first one is retried.
    pub fn on_transient(&self, consecutive: u32) -> RetryDecision {
        if consecutive <= 1 {
            RetryDecision::Retry(self.transient_delay)
        } else {
            RetryDecision::GiveUp
        }
    }
}
