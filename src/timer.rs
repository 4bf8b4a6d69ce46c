//! Delayed callbacks with cancellation
//!
//! [`Timer`] is the scheduling capability the copy controller uses for its
//! auto-reset. [`TokioTimer`] runs callbacks on a tokio runtime;
//! [`ManualTimer`] is a virtual clock that only moves when told to.

mod manual;
mod tokio_timer;

use std::sync::Arc;
use std::time::Duration;

pub use manual::ManualTimer;
pub use tokio_timer::TokioTimer;

/// Work to run once a scheduled delay elapses
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait Timer: Send + Sync {
    /// Run `callback` once `delay` has elapsed
    ///
    /// The callback must never run inside `schedule` itself, even for a
    /// zero delay.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Stop a scheduled callback from running
    ///
    /// Cancelling a handle that already fired or was already cancelled
    /// does nothing.
    fn cancel(&self, handle: TimerHandle);
}

impl<T: Timer + ?Sized> Timer for Arc<T> {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        (**self).schedule(delay, callback)
    }

    fn cancel(&self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}
