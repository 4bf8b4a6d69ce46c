//! Configuration for clipcopy
//!
//! Settings are read from `<config_dir>/clipcopy/config.toml`. Every field
//! is optional; anything missing falls back to its default.

mod loader;
mod types;

pub use loader::{ConfigResult, default_config_path, load_config, load_config_from};
pub use types::{ClipboardBackend, ClipboardConfig, Config, CopyConfig, DEFAULT_TIMEOUT_MS};
