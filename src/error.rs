use std::path::PathBuf;

use thiserror::Error;

/// Why a copy attempt did not land on the clipboard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// No clipboard is reachable from this environment
    #[error("Clipboard not supported in this environment")]
    Unsupported,

    /// The clipboard exists but rejected the write
    #[error("Failed to write to clipboard: {0}")]
    WriteFailed(String),
}

/// Errors raised while reading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
