//! Config file discovery and loading
//!
//! Loading never fails outright: a broken file yields the default config
//! and a warning the caller can show to the user.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ConfigError;

/// Loaded config plus an optional warning describing why defaults were used
#[derive(Debug)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// `<config_dir>/clipcopy/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clipcopy").join("config.toml"))
}

/// Load config from the platform default location
pub fn load_config() -> ConfigResult {
    match default_config_path() {
        Some(path) => load_config_from(&path),
        None => {
            log::debug!("No platform config directory; using defaults");
            ConfigResult {
                config: Config::default(),
                warning: None,
            }
        }
    }
}

/// Load config from an explicit path
///
/// A missing file is not an error. Unreadable or malformed files fall back
/// to defaults and report a warning.
pub fn load_config_from(path: &Path) -> ConfigResult {
    match read_config(path) {
        Ok(Some(config)) => {
            log::debug!("Loaded config from {}", path.display());
            ConfigResult {
                config,
                warning: None,
            }
        }
        Ok(None) => ConfigResult {
            config: Config::default(),
            warning: None,
        },
        Err(e) => {
            log::warn!("{}", e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("{}. Using default configuration.", e)),
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Option<Config>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod loader_tests;
