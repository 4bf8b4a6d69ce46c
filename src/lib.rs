//! clipcopy: copy text to the clipboard with transient "copied" feedback
//!
//! The heart of the crate is [`CopyController`], a small state machine
//! that writes through an injected [`ClipboardPort`], raises a `copied`
//! flag for a configured window, and surfaces failures as state. The
//! clipboard and the reset timer are both injected, so the controller runs
//! the same against the OS clipboard and against deterministic doubles.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod copy;
pub mod error;
pub mod timer;

pub use clipboard::{BackendClipboard, ClipboardPort, MemoryClipboard};
pub use config::{ClipboardBackend, Config, CopyConfig};
pub use copy::{CopyController, CopyStatus};
pub use error::{ConfigError, CopyError};
pub use timer::{ManualTimer, Timer, TimerHandle, TokioTimer};
