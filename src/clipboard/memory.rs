//! In-memory clipboard
//!
//! A deterministic [`ClipboardPort`] for tests and headless embedding. The
//! outcome of each write is configurable, every write is recorded, and a
//! write can be held open until the test releases it.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use super::backend::ClipboardResult;
use super::port::ClipboardPort;
use crate::error::CopyError;

/// What the next writes to a [`MemoryClipboard`] do
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WriteOutcome {
    #[default]
    Succeed,
    Fail(String),
    Unavailable,
}

/// Holds a pending write open until [`release`](WriteGate::release) or drop
#[derive(Debug)]
pub struct WriteGate {
    tx: oneshot::Sender<()>,
}

impl WriteGate {
    pub fn release(self) {
        let _ = self.tx.send(());
    }
}

#[derive(Debug, Default)]
struct Inner {
    outcome: WriteOutcome,
    contents: Option<String>,
    attempts: Vec<String>,
    gates: VecDeque<oneshot::Receiver<()>>,
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    inner: Mutex<Inner>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(outcome: WriteOutcome) -> Self {
        let clipboard = Self::new();
        clipboard.set_outcome(outcome);
        clipboard
    }

    /// Change the outcome of writes started from now on
    pub fn set_outcome(&self, outcome: WriteOutcome) {
        self.lock().outcome = outcome;
    }

    /// Make the next write wait until the returned gate is released
    pub fn hold_next_write(&self) -> WriteGate {
        let (tx, rx) = oneshot::channel();
        self.lock().gates.push_back(rx);
        WriteGate { tx }
    }

    /// Text of the last write that completed successfully
    pub fn contents(&self) -> Option<String> {
        self.lock().contents.clone()
    }

    /// Every text passed to `write_text`, in call order
    pub fn attempts(&self) -> Vec<String> {
        self.lock().attempts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClipboardPort for MemoryClipboard {
    fn is_available(&self) -> bool {
        self.lock().outcome != WriteOutcome::Unavailable
    }

    fn write_text(&self, text: String) -> impl Future<Output = ClipboardResult> + Send {
        let (outcome, gate) = {
            let mut inner = self.lock();
            inner.attempts.push(text.clone());
            (inner.outcome.clone(), inner.gates.pop_front())
        };

        async move {
            if let Some(gate) = gate {
                // A dropped gate releases the write too
                let _ = gate.await;
            }

            match outcome {
                WriteOutcome::Succeed => {
                    self.lock().contents = Some(text);
                    Ok(())
                }
                WriteOutcome::Fail(detail) => Err(CopyError::WriteFailed(detail)),
                WriteOutcome::Unavailable => Err(CopyError::Unsupported),
            }
        }
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
