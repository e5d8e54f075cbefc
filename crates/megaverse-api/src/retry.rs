//! Retry policy for rate-limited requests
//!
//! The megaverse service throttles aggressively; every call site shares one
//! exponential backoff schedule, bounded by an attempt budget and a delay cap.

use std::time::Duration;

/// Backoff schedule applied when the service responds with HTTP 429.
///
/// Delays grow as `base_delay * 2^attempt`, capped at `max_delay`. The
/// schedule is deterministic: no jitter is applied, so the exact wait for a
/// given attempt is predictable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts before giving up (first try included)
    pub max_attempts: u32,
    /// Delay for attempt 0; doubles each subsequent attempt
    pub base_delay: Duration,
    /// Upper bound on any single backoff delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Create the default policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different attempt budget
    #[inline]
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// With a different base delay
    #[inline]
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// With a different delay cap
    #[inline]
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Backoff delay for a zero-based attempt index.
    ///
    /// Saturates rather than overflowing for absurd attempt counts; the cap
    /// makes anything past `max_delay.ilog2()` doublings equivalent anyway.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}
