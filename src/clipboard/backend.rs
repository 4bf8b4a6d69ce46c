//! Clipboard backend selection
//!
//! This module provides the main entry point for clipboard operations,
//! selecting the appropriate backend based on configuration.

use std::future::Future;

use super::osc52;
use super::port::{ClipboardPort, run_blocking};
use super::system::SystemClipboard;
use crate::config::ClipboardBackend;
use crate::error::CopyError;

/// Result type for clipboard operations
pub type ClipboardResult = Result<(), CopyError>;

/// A [`ClipboardPort`] that dispatches on a configured [`ClipboardBackend`]
///
/// # Backend Selection
/// - `System`: Uses only the OS clipboard API (via arboard)
/// - `Osc52`: Uses only OSC 52 escape sequences
/// - `Auto`: Tries system clipboard first, falls back to OSC 52 if unavailable
///
/// The system clipboard handle stays open while this port (or a clone of
/// it) is alive.
#[derive(Debug, Clone, Default)]
pub struct BackendClipboard {
    backend: ClipboardBackend,
    system: SystemClipboard,
}

impl BackendClipboard {
    pub fn new(backend: ClipboardBackend) -> Self {
        Self {
            backend,
            system: SystemClipboard::new(),
        }
    }

    pub fn backend(&self) -> ClipboardBackend {
        self.backend
    }

    /// Copy text using the configured backend, blocking until it is written
    pub fn copy(&self, text: &str) -> ClipboardResult {
        match self.backend {
            ClipboardBackend::System => self.system.copy(text),
            ClipboardBackend::Osc52 => osc52::copy(text),
            ClipboardBackend::Auto => self.system.copy(text).or_else(|e| {
                log::debug!("System clipboard failed ({}), falling back to OSC 52", e);
                osc52::copy(text)
            }),
        }
    }

    /// The system clipboard port this backend writes through
    pub fn system(&self) -> &SystemClipboard {
        &self.system
    }
}

impl ClipboardPort for BackendClipboard {
    fn is_available(&self) -> bool {
        match self.backend {
            ClipboardBackend::System => self.system.is_available(),
            // OSC 52 needs nothing from the environment but stdout
            ClipboardBackend::Osc52 | ClipboardBackend::Auto => true,
        }
    }

    fn write_text(&self, text: String) -> impl Future<Output = ClipboardResult> + Send {
        let port = self.clone();
        run_blocking(move || port.copy(&text))
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;
