use std::future::Future;
use std::sync::Arc;

use super::backend::ClipboardResult;
use crate::error::CopyError;

/// Write-only access to a clipboard
///
/// Availability is queried up front so callers can report
/// [`CopyError::Unsupported`] without attempting a write.
pub trait ClipboardPort: Send + Sync {
    /// Whether this clipboard can be used in the current environment
    fn is_available(&self) -> bool;

    /// Replace the clipboard contents with `text`
    ///
    /// # Panics
    /// The built-in OS and OSC 52 ports hand the write to tokio's blocking
    /// pool, so their futures panic when polled outside a tokio runtime.
    fn write_text(&self, text: String) -> impl Future<Output = ClipboardResult> + Send;
}

impl<P: ClipboardPort> ClipboardPort for Arc<P> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn write_text(&self, text: String) -> impl Future<Output = ClipboardResult> + Send {
        (**self).write_text(text)
    }
}

/// Run a blocking clipboard call on tokio's blocking pool
///
/// # Panics
/// Panics when polled outside a tokio runtime.
pub(super) async fn run_blocking<F>(write: F) -> ClipboardResult
where
    F: FnOnce() -> ClipboardResult + Send + 'static,
{
    tokio::task::spawn_blocking(write)
        .await
        .unwrap_or_else(|e| Err(CopyError::WriteFailed(format!("clipboard task failed: {}", e))))
}
