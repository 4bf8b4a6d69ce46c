use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio_util::sync::CancellationToken;

use super::{Timer, TimerCallback, TimerHandle};

type Tokens = Arc<Mutex<HashMap<TimerHandle, CancellationToken>>>;

/// Timer backed by tasks on a tokio runtime
///
/// Each scheduled callback is a task racing `tokio::time::sleep` against a
/// cancellation token. A callback runs only if its entry is still
/// registered when the sleep ends, so a cancel that lands between the
/// sleep completing and the callback running still wins.
#[derive(Debug)]
pub struct TokioTimer {
    runtime: Handle,
    next_id: AtomicU64,
    tokens: Tokens,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tokens: Arc::default(),
        }
    }

    /// Timer on the runtime the caller is running in
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    /// Number of callbacks scheduled and not yet fired or cancelled
    pub fn pending(&self) -> usize {
        lock(&self.tokens).len()
    }
}

fn lock(tokens: &Tokens) -> MutexGuard<'_, HashMap<TimerHandle, CancellationToken>> {
    tokens.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Timer for TokioTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        let token = CancellationToken::new();
        lock(&self.tokens).insert(handle, token.clone());

        let tokens = Arc::clone(&self.tokens);
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log::debug!("Timer {} cancelled", handle.id());
                }
                _ = tokio::time::sleep(delay) => {
                    let still_scheduled = lock(&tokens).remove(&handle).is_some();
                    if still_scheduled {
                        callback();
                    }
                }
            }
        });

        log::debug!("Timer {} scheduled in {:?}", handle.id(), delay);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(token) = lock(&self.tokens).remove(&handle) {
            token.cancel();
        }
    }
}

#[cfg(test)]
#[path = "tokio_timer_tests.rs"]
mod tokio_timer_tests;
