//! Retry-with-backoff execution for fallible operations.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;

/// Retry policy for one operation.
///
/// `attempts` of zero still runs the operation once. Waits grow linearly:
/// attempt `n` (zero-based) is followed by `backoff * (n + 1)` plus a
/// uniformly random slice of `jitter`, sampled per wait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub attempts: u32,
    pub backoff: Duration,
    pub jitter: Duration,
}

impl Config {
    fn attempts(&self) -> u32 {
        self.attempts.max(1)
    }

    fn backoff(&self, attempt: u32) -> Duration {
        if self.backoff.is_zero() {
            return Duration::ZERO;
        }

        let base = self.backoff * (attempt + 1);
        if self.jitter.is_zero() {
            return base;
        }

        base + rand::thread_rng().gen_range(Duration::ZERO..=self.jitter)
    }
}

/// Why a retried operation gave up.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("gave up after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },

    #[error("canceled while waiting to retry")]
    Canceled,
}

/// Run `op` until it succeeds, the attempt budget is spent, or `cancel`
/// fires during a backoff wait.
///
/// There is no wait after the final attempt; exhaustion surfaces the last
/// error immediately. Cancellation is only observed during an actual wait:
/// an in-flight `op` runs to completion, and a zero backoff skips waiting
/// entirely.
pub async fn on_error<T, E, F, Fut>(
    cancel: &CancellationToken,
    cfg: Config,
    mut op: F,
) -> Result<T, Error<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = cfg.attempts();
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(source) => {
                tracing::debug!(attempt, attempts, "attempt failed");

                if attempt + 1 == attempts {
                    return Err(Error::Exhausted { attempts, source });
                }
            }
        }

        // A zero wait is not a cancellation point; every attempt runs.
        let wait = cfg.backoff(attempt);
        if !wait.is_zero() {
            tokio::select! {
                () = cancel.cancelled() => return Err(Error::Canceled),
                () = tokio::time::sleep(wait) => {}
            }
        }

        attempt += 1;
    }
}
