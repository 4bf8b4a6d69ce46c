use std::path::PathBuf;

use clap::Parser;

use crate::config::{ClipboardBackend, Config};

#[derive(Parser, Debug)]
#[command(name = "clipcopy", version)]
#[command(about = "Copy text to the clipboard and confirm it", long_about = None)]
pub struct Cli {
    /// Text to copy (reads stdin when omitted)
    pub text: Option<String>,

    /// Clipboard backend to use
    #[arg(short, long, value_enum)]
    pub backend: Option<ClipboardBackend>,

    /// How long to report the text as copied, in milliseconds
    #[arg(short, long)]
    pub timeout_ms: Option<u64>,

    /// Read configuration from this file instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit as soon as the text is copied instead of waiting for the reset
    #[arg(long)]
    pub no_wait: bool,
}

impl Cli {
    /// Overlay command-line flags on top of file configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(backend) = self.backend {
            config.clipboard.backend = backend;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.copy.timeout_ms = timeout_ms;
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
