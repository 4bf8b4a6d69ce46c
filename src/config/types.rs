// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

/// How long the copied flag stays set when nothing overrides it
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Clipboard backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    #[default]
    Auto,
    System,
    #[value(name = "osc52")]
    Osc52,
}

/// Clipboard configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub backend: ClipboardBackend,
}

/// Copy feedback configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CopyConfig {
    /// Milliseconds the copied flag remains true after a successful write
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl CopyConfig {
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub copy: CopyConfig,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
