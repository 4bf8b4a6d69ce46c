//! OSC 52 clipboard backend
//!
//! Asks the terminal emulator to set the clipboard by writing
//! `ESC ] 52 ; c ; <base64> BEL` to stdout. Works over SSH and in
//! sessions without a display server, as long as the terminal honours it.

use std::future::Future;
use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::backend::ClipboardResult;
use super::port::{ClipboardPort, run_blocking};
use crate::error::CopyError;

pub fn copy(text: &str) -> ClipboardResult {
    let sequence = encode_osc52(text);

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(sequence.as_bytes())
        .map_err(|e| CopyError::WriteFailed(e.to_string()))?;

    stdout
        .flush()
        .map_err(|e| CopyError::WriteFailed(e.to_string()))
}

pub fn encode_osc52(text: &str) -> String {
    let encoded = STANDARD.encode(text);
    format!("\x1b]52;c;{}\x07", encoded)
}

/// OSC 52 as a [`ClipboardPort`]
///
/// Always reports itself available; whether the terminal acts on the
/// sequence cannot be observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard;

impl ClipboardPort for Osc52Clipboard {
    fn is_available(&self) -> bool {
        true
    }

    fn write_text(&self, text: String) -> impl Future<Output = ClipboardResult> + Send {
        run_blocking(move || copy(&text))
    }
}

#[cfg(test)]
#[path = "osc52_tests.rs"]
mod osc52_tests;
