use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::copy_state::{CopyState, CopyStatus};
use crate::clipboard::ClipboardPort;
use crate::config::CopyConfig;
use crate::error::CopyError;
use crate::timer::Timer;

/// Copy action with auto-resetting "copied" feedback
///
/// Meant for a single logical caller, such as one copy button. The clipboard
/// and timer are injected so the controller can run against real backends
/// or deterministic doubles.
///
/// # State transitions
/// - A successful write sets `copied` and (re)starts the reset timer.
/// - A failed write sets `error` and leaves `copied` and any pending
///   timer as they were.
/// - An unavailable clipboard sets `error` to [`CopyError::Unsupported`]
///   without attempting a write.
/// - Every attempt clears the previous `error` first.
///
/// Dropping the controller cancels its pending timer.
pub struct CopyController<P, T>
where
    P: ClipboardPort,
    T: Timer,
{
    clipboard: P,
    timer: T,
    config: CopyConfig,
    state: Arc<Mutex<CopyState>>,
}

impl<P, T> CopyController<P, T>
where
    P: ClipboardPort,
    T: Timer,
{
    pub fn new(clipboard: P, timer: T, config: CopyConfig) -> Self {
        Self {
            clipboard,
            timer,
            config,
            state: Arc::new(Mutex::new(CopyState::new())),
        }
    }

    pub fn config(&self) -> &CopyConfig {
        &self.config
    }

    /// Copy `text`, recording the outcome in this controller's state
    ///
    /// Never fails: inspect [`status`](Self::status) afterwards, or watch
    /// [`subscribe`](Self::subscribe), to learn what happened.
    pub async fn copy(&self, text: impl Into<String>) {
        let text = text.into();

        // One error update per attempt
        if !self.clipboard.is_available() {
            log::debug!("Clipboard unavailable; skipping copy");
            lock(&self.state).set_error(Some(CopyError::Unsupported));
            return;
        }
        lock(&self.state).set_error(None);

        let len = text.len();
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                log::debug!("Copied {} bytes to clipboard", len);
                self.mark_copied();
            }
            Err(e) => {
                log::debug!("Clipboard write failed: {}", e);
                lock(&self.state).set_error(Some(e));
            }
        }
    }

    /// Clear all feedback and cancel the pending reset. Idempotent.
    pub fn reset(&self) {
        let mut state = lock(&self.state);
        if let Some(handle) = state.disarm() {
            self.timer.cancel(handle);
        }
        state.set_copied(false);
        state.set_error(None);
    }

    pub fn copied(&self) -> bool {
        lock(&self.state).status().copied
    }

    pub fn error(&self) -> Option<CopyError> {
        lock(&self.state).status().error.clone()
    }

    pub fn status(&self) -> CopyStatus {
        lock(&self.state).status().clone()
    }

    /// Whether a reset timer is outstanding
    pub fn has_pending_reset(&self) -> bool {
        lock(&self.state).has_pending()
    }

    /// Receive every status change from now on
    pub fn subscribe(&self) -> watch::Receiver<CopyStatus> {
        lock(&self.state).subscribe()
    }

    fn mark_copied(&self) {
        let mut state = lock(&self.state);
        if let Some(stale) = state.disarm() {
            self.timer.cancel(stale);
        }
        state.set_copied(true);

        let generation = state.next_generation();
        let weak: Weak<Mutex<CopyState>> = Arc::downgrade(&self.state);
        let handle = self.timer.schedule(
            self.config.timeout(),
            Box::new(move || {
                // The controller may be gone; nothing to reset then
                if let Some(state) = weak.upgrade() {
                    lock(&state).expire(generation);
                }
            }),
        );
        state.arm(handle, generation);
    }
}

impl<P, T> CopyController<P, T>
where
    P: ClipboardPort + 'static,
    T: Timer + 'static,
{
    /// Start a copy on the current tokio runtime without waiting for it
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn spawn_copy(self: &Arc<Self>, text: impl Into<String>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let text = text.into();
        tokio::spawn(async move { controller.copy(text).await })
    }
}

impl<P, T> Drop for CopyController<P, T>
where
    P: ClipboardPort,
    T: Timer,
{
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.state).disarm() {
            self.timer.cancel(handle);
        }
    }
}

impl<P, T> std::fmt::Debug for CopyController<P, T>
where
    P: ClipboardPort,
    T: Timer,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyController")
            .field("config", &self.config)
            .field("state", &*lock(&self.state))
            .finish()
    }
}

fn lock(state: &Mutex<CopyState>) -> MutexGuard<'_, CopyState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
