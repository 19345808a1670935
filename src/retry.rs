use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    GiveUp,
}

/// Exponential backoff with bounded random jitter. The delay applies
/// before every attempt, including the first.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    base_delay: f64,
    jitter_max: f64,
    max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(base_delay: f64, jitter_max: f64, max_attempts: u32) -> Self {
        Self {
            base_delay: base_delay.max(0.0),
            jitter_max: jitter_max.max(0.0),
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Deterministic component of the delay before attempt `n` (1-based):
    /// base_delay * 2^(n-1).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2f64.powi(attempt.saturating_sub(1) as i32);
        Duration::from_secs_f64(self.base_delay * factor)
    }

    /// Full pre-attempt delay: backoff plus a uniform jitter in [0, jitter_max).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let jitter = if self.jitter_max > 0.0 {
            rand::rng().random_range(0.0..self.jitter_max)
        } else {
            0.0
        };
        self.backoff(attempt) + Duration::from_secs_f64(jitter)
    }

    pub fn after_failure(&self, attempt: u32) -> RetryDecision {
        if attempt < self.max_attempts {
            RetryDecision::Retry
        } else {
            RetryDecision::GiveUp
        }
    }
}
