//! Clipboard access
//!
//! [`ClipboardPort`] is the capability the copy controller writes through.
//! Real environments use [`BackendClipboard`] (or one of its backends
//! directly); tests use [`MemoryClipboard`].

mod backend;
mod memory;
mod osc52;
mod port;
mod system;

pub use backend::{BackendClipboard, ClipboardResult};
pub use memory::{MemoryClipboard, WriteGate, WriteOutcome};
pub use osc52::{Osc52Clipboard, encode_osc52};
pub use port::ClipboardPort;
pub use system::SystemClipboard;
