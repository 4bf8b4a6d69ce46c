//! System clipboard backend
//!
//! Provides clipboard access via the operating system's native clipboard API
//! using the arboard crate.
//!
//! On X11 and Wayland the copied text is served by whoever owns the
//! clipboard, so the port keeps its `arboard::Clipboard` open for as long
//! as the port itself lives. Dropping the last handle hands the contents to
//! a clipboard manager if one is running, and loses them otherwise.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arboard::Clipboard;

use super::backend::ClipboardResult;
use super::port::{ClipboardPort, run_blocking};
use crate::error::CopyError;

#[derive(Default)]
struct Holder {
    clipboard: Option<Clipboard>,
    opened: usize,
}

impl Holder {
    /// The open handle, opening one on first use
    fn open(&mut self) -> Result<&mut Clipboard, CopyError> {
        if self.clipboard.is_none() {
            let clipboard = Clipboard::new().map_err(|e| {
                log::debug!("System clipboard unavailable: {}", e);
                CopyError::Unsupported
            })?;
            self.clipboard = Some(clipboard);
            self.opened += 1;
        }
        self.clipboard.as_mut().ok_or(CopyError::Unsupported)
    }
}

/// The OS clipboard as a [`ClipboardPort`]
///
/// Clones share one underlying handle.
#[derive(Clone, Default)]
pub struct SystemClipboard {
    holder: Arc<Mutex<Holder>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy text to the system clipboard, blocking until arboard returns
    ///
    /// Fails with [`CopyError::Unsupported`] when no clipboard can be opened
    /// (headless sessions, no display server) and with
    /// [`CopyError::WriteFailed`] when the clipboard refuses the text.
    pub fn copy(&self, text: &str) -> ClipboardResult {
        let mut holder = self.lock();
        holder
            .open()?
            .set_text(text)
            .map_err(|e| CopyError::WriteFailed(e.to_string()))
    }

    /// Whether a system clipboard can be opened; keeps it open if so
    pub fn is_available(&self) -> bool {
        self.lock().open().is_ok()
    }

    /// How many clipboard handles this port has opened
    pub fn handles_opened(&self) -> usize {
        self.lock().opened
    }

    fn lock(&self) -> MutexGuard<'_, Holder> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let holder = self.lock();
        f.debug_struct("SystemClipboard")
            .field("open", &holder.clipboard.is_some())
            .field("opened", &holder.opened)
            .finish()
    }
}

impl ClipboardPort for SystemClipboard {
    fn is_available(&self) -> bool {
        SystemClipboard::is_available(self)
    }

    fn write_text(&self, text: String) -> impl Future<Output = ClipboardResult> + Send {
        let port = self.clone();
        run_blocking(move || port.copy(&text))
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod system_tests;
