//! Wait schedules for polling a remote job and for retrying a provider call.

use std::time::Duration;

/// Growth of the wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Fixed interval.
    None,
    /// Interval doubles each attempt, capped at `max`.
    Exponential { max: Duration },
}

/// How long to wait between attempts, and how many attempts to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn fixed(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            backoff: Backoff::None,
        }
    }

    /// Doubling waits starting at `interval`, never longer than `max`.
    pub fn exponential(interval: Duration, max_attempts: u32, max: Duration) -> Self {
        Self {
            interval,
            max_attempts,
            backoff: Backoff::Exponential { max },
        }
    }

    /// Wait before attempt `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::None => self.interval,
            Backoff::Exponential { max } => {
                let factor = 2u32.saturating_pow(attempt);
                self.interval.saturating_mul(factor).min(max)
            }
        }
    }

    /// Upper bound on the time spent waiting across every attempt.
    pub fn max_total_wait(&self) -> Duration {
        (0..self.max_attempts)
            .map(|attempt| self.delay_for(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}
