use crate::Error;
use std::time::Duration;

use super::config::ClientConfig;

/// Internal decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Retry policy for one-shot requests.
///
/// - Backoff is linear in the retry number (1 unit before the first retry, 2 before
///   the second, ...), uncapped and without jitter.
/// - Authentication and bad-request failures stop the loop, as do construction,
///   marshal, decode and cancellation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries(),
            backoff_unit: config.retry_backoff_unit(),
        }
    }

    /// Wait before retry number `retry` (1-based).
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        self.backoff_unit.saturating_mul(retry)
    }

    /// Decide what to do after `failed_attempts` attempts have failed, the last with `err`.
    pub fn decide(&self, err: &Error, failed_attempts: u32) -> Decision {
        if !err.is_retryable() || failed_attempts > self.max_retries {
            return Decision::Fail;
        }
        Decision::Retry {
            delay: self.backoff_delay(failed_attempts),
        }
    }
}
