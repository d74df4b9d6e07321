use std::time::Duration;

use crate::{retry::BackoffPolicy, HeyGenError, Result};

/// Configures HTTP timeout and retry behavior.
///
/// Shared read-only by every call issued through one client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of attempts, including the first one.
    pub max_attempts: usize,
    /// Lower bound for a single backoff delay in milliseconds.
    pub retry_min_wait_ms: u64,
    /// Upper bound for a single backoff delay in milliseconds.
    pub retry_max_wait_ms: u64,
    /// Base of the exponential backoff in milliseconds.
    pub retry_multiplier_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            max_attempts: 3,
            retry_min_wait_ms: 1_000,
            retry_max_wait_ms: 10_000,
            retry_multiplier_ms: 1_000,
        }
    }
}

impl ClientOptions {
    /// Reads overrides from the environment on top of [`ClientOptions::default`].
    ///
    /// Recognized variables:
    /// - `HEYGEN_TIMEOUT_MS`
    /// - `HEYGEN_MAX_ATTEMPTS`
    /// - `HEYGEN_RETRY_MIN_WAIT_MS`
    /// - `HEYGEN_RETRY_MAX_WAIT_MS`
    /// - `HEYGEN_RETRY_MULTIPLIER_MS`
    ///
    /// Unset variables keep their default. A value that does not parse is a
    /// [`HeyGenError::Config`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let options = Self {
            timeout_ms: read_var(&lookup, "HEYGEN_TIMEOUT_MS", defaults.timeout_ms)?,
            max_attempts: read_var(&lookup, "HEYGEN_MAX_ATTEMPTS", defaults.max_attempts)?,
            retry_min_wait_ms: read_var(
                &lookup,
                "HEYGEN_RETRY_MIN_WAIT_MS",
                defaults.retry_min_wait_ms,
            )?,
            retry_max_wait_ms: read_var(
                &lookup,
                "HEYGEN_RETRY_MAX_WAIT_MS",
                defaults.retry_max_wait_ms,
            )?,
            retry_multiplier_ms: read_var(
                &lookup,
                "HEYGEN_RETRY_MULTIPLIER_MS",
                defaults.retry_multiplier_ms,
            )?,
        };
        options.validate()?;
        Ok(options)
    }

    /// Rejects settings that cannot drive a retry loop.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(HeyGenError::Config(
                "max_attempts must be at least 1".to_owned(),
            ));
        }
        if self.retry_min_wait_ms > self.retry_max_wait_ms {
            return Err(HeyGenError::Config(format!(
                "retry_min_wait_ms ({}) exceeds retry_max_wait_ms ({})",
                self.retry_min_wait_ms, self.retry_max_wait_ms
            )));
        }
        Ok(())
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn backoff(&self) -> BackoffPolicy {
        BackoffPolicy {
            max_attempts: self.max_attempts.max(1),
            min_wait: Duration::from_millis(self.retry_min_wait_ms),
            max_wait: Duration::from_millis(self.retry_max_wait_ms),
            multiplier: Duration::from_millis(self.retry_multiplier_ms),
        }
    }
}

fn read_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|err| HeyGenError::Config(format!("invalid {key} '{raw}': {err}"))),
    }
}
