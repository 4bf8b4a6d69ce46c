use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{Timer, TimerCallback, TimerHandle};

struct Entry {
    handle: TimerHandle,
    deadline: Duration,
    callback: TimerCallback,
}

#[derive(Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
    scheduled: usize,
    fired: usize,
}

/// Deterministic timer driven by a virtual clock
///
/// Nothing fires until [`advance`](ManualTimer::advance) moves the clock
/// past a deadline. Due callbacks run in deadline order, ties broken by
/// scheduling order.
#[derive(Default)]
pub struct ManualTimer {
    inner: Mutex<Inner>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Callbacks scheduled and not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.lock().entries.len()
    }

    /// Total callbacks ever scheduled
    pub fn scheduled(&self) -> usize {
        self.lock().scheduled
    }

    /// Total callbacks that have run
    pub fn fired(&self) -> usize {
        self.lock().fired
    }

    /// Move the clock forward and run every callback that came due
    ///
    /// `advance(Duration::ZERO)` runs callbacks scheduled with no delay.
    /// Callbacks run without the timer's lock held, so they may schedule
    /// or cancel further timers.
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;

        loop {
            let due = {
                let mut inner = self.lock();
                let next = inner
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.deadline <= target)
                    .min_by_key(|(_, entry)| (entry.deadline, entry.handle))
                    .map(|(index, _)| index);

                match next {
                    Some(index) => {
                        let entry = inner.entries.remove(index);
                        inner.now = inner.now.max(entry.deadline);
                        inner.fired += 1;
                        Some(entry.callback)
                    }
                    None => {
                        inner.now = target;
                        None
                    }
                }
            };

            match due {
                Some(callback) => callback(),
                None => break,
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ManualTimer")
            .field("now", &inner.now)
            .field("pending", &inner.entries.len())
            .finish()
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut inner = self.lock();
        inner.next_id += 1;
        inner.scheduled += 1;

        let handle = TimerHandle(inner.next_id);
        let deadline = inner.now + delay;
        inner.entries.push(Entry {
            handle,
            deadline,
            callback,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        self.lock().entries.retain(|entry| entry.handle != handle);
    }
}

#[cfg(test)]
#[path = "manual_tests.rs"]
mod manual_tests;
