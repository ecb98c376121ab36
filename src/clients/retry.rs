//! Bounded retry with backoff for API calls.
//!
//! Every logical API call runs through [`run`], which attempts the unit of
//! work up to [`RetryPolicy::max_attempts`] times. The first attempt is
//! immediate; before each subsequent attempt the controller waits
//! `base_delay × attempts_so_far × multiplier`, capped at `max_delay`.
//! Errors are only retried when [`Error::is_retryable`] says so — the
//! executor itself never retries.
//!
//! Waits are interruptible: when a deadline is supplied and fires during a
//! backoff wait or an attempt, the call returns
//! [`Error::DeadlineExceeded`] immediately instead of completing the wait.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, sleep_until, timeout_at, Instant};

use crate::clients::errors::Error;

/// Retry behavior for a client, fixed at construction.
///
/// # Backoff
///
/// The delay before attempt `n + 1` is
/// `base_delay × n × multiplier`, capped at `max_delay` — linear in the
/// attempt number scaled by a constant, not strict exponential doubling.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use dokan_api::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
///
/// let patient = RetryPolicy {
///     max_attempts: 5,
///     base_delay: Duration::from_millis(500),
///     ..RetryPolicy::default()
/// };
/// assert_eq!(patient.backoff_delay(1), Duration::from_secs(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Values below 1 are
    /// treated as 1: zero retries means exactly one attempt.
    pub max_attempts: u32,
    /// Base delay scaled by the attempt number.
    pub base_delay: Duration,
    /// Upper bound on any single backoff wait.
    pub max_delay: Duration,
    /// Constant factor applied to every delay.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Returns the default policy with a different attempt count.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Computes the backoff delay after `attempts` completed attempts.
    #[must_use]
    pub fn backoff_delay(&self, attempts: u32) -> Duration {
        self.base_delay
            .mul_f64(f64::from(attempts) * self.multiplier)
            .min(self.max_delay)
    }
}

/// Runs a unit of work under the given retry policy.
///
/// The deadline, when present, bounds the whole call: it is checked before
/// each attempt, each attempt runs under it (aborting in-flight I/O when
/// it fires), and a backoff wait it would interrupt ends the call as soon
/// as the deadline passes. A deadline already expired at entry fails
/// before any attempt or delay.
///
/// # Errors
///
/// Returns the unit of work's error as soon as it is non-retryable, the
/// last observed error once attempts are exhausted, or
/// [`Error::DeadlineExceeded`] when the deadline fires first.
pub async fn run<T, F, Fut>(
    policy: &RetryPolicy,
    deadline: Option<Instant>,
    mut work: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts: u32 = 0;

    loop {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Error::DeadlineExceeded);
        }

        let result = match deadline {
            Some(deadline) => match timeout_at(deadline, work()).await {
                Ok(result) => result,
                Err(_) => return Err(Error::DeadlineExceeded),
            },
            None => work().await,
        };

        attempts += 1;
        let error = match result {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !error.is_retryable() || attempts >= max_attempts {
            return Err(error);
        }

        let delay = policy.backoff_delay(attempts);
        tracing::debug!(
            attempts,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %error,
            "retrying request after backoff"
        );

        if let Some(deadline) = deadline {
            if Instant::now() + delay >= deadline {
                // The deadline fires inside this wait; stop the moment it does.
                sleep_until(deadline).await;
                return Err(Error::DeadlineExceeded);
            }
        }
        sleep(delay).await;
    }
}
