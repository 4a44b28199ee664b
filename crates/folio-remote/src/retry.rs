//! Bounded retry with exponential backoff.
//!
//! Only failures classified by [`RemoteError::is_retryable`] are repeated; a
//! rejected write (4xx) is returned on the first attempt. Creating requests
//! use the narrower [`RemoteError::is_resendable`].

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::RemoteError;

/// Retry behaviour for a single logical request.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Delay before retry number `retry` (0-indexed): `base * 2^retry`, capped.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Delay for `error`, honouring a server-provided `Retry-After`.
    fn delay_after(&self, retry: u32, error: &RemoteError) -> Duration {
        match error {
            RemoteError::RateLimited { retry_after_secs } => {
                Duration::from_secs(*retry_after_secs).min(self.max_delay)
            }
            _ => self.delay_for(retry),
        }
    }

    /// Run `operation`, repeating it on retryable failures.
    ///
    /// # Errors
    ///
    /// Returns the last error once it is not retryable or the attempts are
    /// exhausted.
    pub async fn run<F, Fut, T>(&self, what: &str, operation: F) -> Result<T, RemoteError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        self.run_with(what, RemoteError::is_retryable, operation).await
    }

    /// Like [`run`](Self::run), but only failures accepted by `retryable` are
    /// repeated.
    ///
    /// # Errors
    ///
    /// Returns the last error once `retryable` rejects it or the attempts are
    /// exhausted.
    pub async fn run_with<F, Fut, T>(
        &self,
        what: &str,
        retryable: fn(&RemoteError) -> bool,
        mut operation: F,
    ) -> Result<T, RemoteError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let mut retry = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    if retry > 0 {
                        debug!(what, attempts = retry + 1, "request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) if retryable(&error) && retry < self.max_retries => {
                    let delay = self.delay_after(retry, &error);
                    warn!(
                        what,
                        attempt = retry + 1,
                        max_attempts = self.max_retries + 1,
                        ?delay,
                        %error,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
