//! Bounded exponential backoff around a single logical call.
//!
//! [`run_with_retry`] drives one call to completion: it invokes the
//! operation, asks the classifier whether a failure is worth another try,
//! and sleeps according to a [`BackoffPolicy`] in between. Attempts are
//! strictly sequential.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::{HeyGenError, Result};

/// Verdict of a classifier over a failed attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Classification {
    /// Transient condition; another attempt may succeed.
    Retryable,
    /// Permanent condition; surface immediately.
    Fatal,
}

/// Exponential backoff bounded by a minimum and maximum delay.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackoffPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: usize,
    /// Lower bound for a single delay.
    pub min_wait: Duration,
    /// Upper bound for a single delay.
    pub max_wait: Duration,
    /// Base delay doubled after every attempt.
    pub multiplier: Duration,
}

impl BackoffPolicy {
    /// Delay to wait after attempt number `attempt` (1-based) failed.
    ///
    /// `multiplier * 2^(attempt - 1)`, floored at `min_wait` and capped at
    /// `max_wait`.
    pub fn delay_after(&self, attempt: usize) -> Duration {
        let exp = attempt.saturating_sub(1).min(20) as u32;
        let raw = self.multiplier.saturating_mul(1u32 << exp);
        raw.min(self.max_wait).max(self.min_wait)
    }
}

/// Per-call retry bookkeeping. Never shared between calls.
#[derive(Debug, Default)]
struct RetryState {
    attempt: usize,
    delay: Duration,
}

/// Runs `op` until it succeeds, fails fatally, or runs out of attempts.
///
/// A warning is logged before every backoff sleep. When the last allowed
/// attempt fails with a retryable error the call ends with
/// [`HeyGenError::RetriesExhausted`].
pub async fn run_with_retry<T, Op, Fut, C>(policy: &BackoffPolicy, classify: C, op: Op) -> Result<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    C: Fn(&HeyGenError) -> Classification,
{
    retry_loop(policy, classify, op, sleep).await
}

async fn retry_loop<T, Op, Fut, C, S, SFut>(
    policy: &BackoffPolicy,
    classify: C,
    mut op: Op,
    mut pause: S,
) -> Result<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    C: Fn(&HeyGenError) -> Classification,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut state = RetryState::default();

    loop {
        state.attempt += 1;
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if classify(&err) == Classification::Fatal {
            return Err(err);
        }

        if state.attempt >= max_attempts {
            return Err(HeyGenError::RetriesExhausted {
                attempts: state.attempt,
                last_error: summarize(&err),
            });
        }

        state.delay = policy.delay_after(state.attempt);
        tracing::warn!(
            attempt = state.attempt,
            max_attempts,
            delay_ms = state.delay.as_millis() as u64,
            error = %err,
            "retrying HeyGen request after transient failure"
        );
        pause(state.delay).await;
    }
}

fn summarize(err: &HeyGenError) -> String {
    if err.is_timeout() {
        "request timed out".to_owned()
    } else {
        err.to_string()
    }
}
