use tokio::sync::watch;

use crate::error::CopyError;
use crate::timer::TimerHandle;

/// What a UI needs to render a copy affordance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStatus {
    /// True for a bounded window after a successful write
    pub copied: bool,
    /// Set when the last attempt failed; cleared by a new attempt or reset
    pub error: Option<CopyError>,
}

impl CopyStatus {
    pub fn is_idle(&self) -> bool {
        !self.copied && self.error.is_none()
    }
}

/// The reset timer currently owned by the controller
///
/// `generation` lets a callback that already left the timer recognise it
/// has been superseded.
#[derive(Debug, Clone, Copy)]
struct PendingReset {
    handle: TimerHandle,
    generation: u64,
}

/// Mutable state shared between a controller and its reset callbacks
#[derive(Debug)]
pub(super) struct CopyState {
    status: CopyStatus,
    pending: Option<PendingReset>,
    generation: u64,
    changes: watch::Sender<CopyStatus>,
}

impl CopyState {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(CopyStatus::default());
        Self {
            status: CopyStatus::default(),
            pending: None,
            generation: 0,
            changes,
        }
    }

    pub fn status(&self) -> &CopyStatus {
        &self.status
    }

    pub fn subscribe(&self) -> watch::Receiver<CopyStatus> {
        self.changes.subscribe()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_error(&mut self, error: Option<CopyError>) {
        if self.status.error != error {
            self.status.error = error;
            self.publish();
        }
    }

    pub fn set_copied(&mut self, copied: bool) {
        if self.status.copied != copied {
            self.status.copied = copied;
            self.publish();
        }
    }

    /// Reserve the generation for the next reset timer
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Record the timer now responsible for clearing `copied`
    pub fn arm(&mut self, handle: TimerHandle, generation: u64) {
        self.pending = Some(PendingReset { handle, generation });
    }

    /// Forget the pending timer, handing its handle back for cancellation
    pub fn disarm(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|pending| pending.handle)
    }

    /// Clear `copied` if `generation` still owns the reset
    ///
    /// Returns false for a superseded callback, which leaves state alone.
    pub fn expire(&mut self, generation: u64) -> bool {
        match self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending = None;
                self.set_copied(false);
                true
            }
            _ => false,
        }
    }

    fn publish(&self) {
        self.changes.send_replace(self.status.clone());
    }
}

#[cfg(test)]
#[path = "copy_state_tests.rs"]
mod copy_state_tests;
