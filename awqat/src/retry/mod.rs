//! Retry mechanism
//!
//! Wraps fallible operations with bounded, backoff-based retry. Only
//! errors the caller classifies as recoverable are retried; cancellation
//! stops the loop before its next attempt; a reported network
//! disconnection lets the backoff wait end early once connectivity
//! returns.

mod policy;

pub use policy::RetryPolicy;

use crate::net::{NetworkMonitor, NetworkState};
use std::future::Future;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outcome of a retried operation that never succeeded.
#[derive(Debug, Error)]
pub enum RetryError<E: std::error::Error + 'static> {
    /// Every allowed attempt failed; carries the final failure.
    #[error("operation failed after {attempts} attempts: {source}")]
    Exhausted { attempts: u32, source: E },

    /// The error was not retryable; surfaced immediately.
    #[error("permanent failure: {0}")]
    Permanent(E),

    /// The caller cancelled while waiting or between attempts.
    #[error("operation cancelled")]
    Cancelled,
}

/// Runs `operation` under `policy`, retrying recoverable failures.
///
/// * `is_retryable` classifies each error; a non-retryable error returns
///   [`RetryError::Permanent`] without further attempts.
/// * `cancel` is honored between attempts and during backoff: a cancelled
///   token yields [`RetryError::Cancelled`], never an exhausted error.
/// * `monitor`, when provided, is advisory: while the state reads
///   `Disconnected` the backoff wait also listens for reconnection so a
///   recovered link is used promptly instead of sleeping out the full
///   delay.
pub async fn execute<T, E, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    monitor: Option<&NetworkMonitor>,
    is_retryable: impl Fn(&E) -> bool,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    E: std::error::Error + 'static,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if cancel.is_cancelled() {
            return Err(RetryError::Cancelled);
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if !is_retryable(&error) => {
                return Err(RetryError::Permanent(error));
            }
            Err(error) if attempt == max_attempts => {
                warn!(attempts = max_attempts, %error, "retry budget exhausted");
                return Err(RetryError::Exhausted {
                    attempts: max_attempts,
                    source: error,
                });
            }
            Err(error) => {
                let delay = policy.delay_for_attempt(attempt);
                debug!(attempt, ?delay, %error, "attempt failed, backing off");
                if backoff(delay, cancel, monitor).await.is_err() {
                    return Err(RetryError::Cancelled);
                }
            }
        }
    }

    unreachable!("loop returns on success, permanence, exhaustion, or cancellation")
}

/// Waits out one backoff delay.
///
/// Returns `Err(())` when cancelled. When the monitor reports
/// `Disconnected`, the wait also completes as soon as the state flips to
/// `Connected`.
async fn backoff(
    delay: std::time::Duration,
    cancel: &CancellationToken,
    monitor: Option<&NetworkMonitor>,
) -> Result<(), ()> {
    let mut reconnect = match monitor {
        Some(m) if m.state() == NetworkState::Disconnected => Some(m.subscribe()),
        _ => None,
    };

    match &mut reconnect {
        Some(rx) => {
            tokio::select! {
                _ = cancel.cancelled() => Err(()),
                _ = tokio::time::sleep(delay) => Ok(()),
                result = rx.wait_for(|s| *s == NetworkState::Connected) => {
                    if result.is_ok() {
                        debug!("connectivity restored, ending backoff early");
                    }
                    Ok(())
                }
            }
        }
        None => {
            tokio::select! {
                _ = cancel.cancelled() => Err(()),
                _ = tokio::time::sleep(delay) => Ok(()),
            }
        }
    }
}
