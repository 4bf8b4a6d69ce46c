//! Copy-to-clipboard with transient "copied" feedback
//!
//! [`CopyController`] writes through a [`ClipboardPort`](crate::clipboard::ClipboardPort),
//! keeps a `copied` flag raised for a configured window, and reports
//! failures as state rather than as returned errors.

mod controller;
mod copy_state;

pub use controller::CopyController;
pub use copy_state::CopyStatus;
