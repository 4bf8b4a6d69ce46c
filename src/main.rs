use std::io::{self, Read};

use clap::Parser;
use color_eyre::Result;

use clipcopy::cli::Cli;
use clipcopy::clipboard::BackendClipboard;
use clipcopy::config::{ConfigResult, load_config, load_config_from};
use clipcopy::copy::CopyController;
use clipcopy::timer::TokioTimer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;
    env_logger::init();

    let cli = Cli::parse();

    let ConfigResult {
        mut config,
        warning,
    } = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    if let Some(warning) = warning {
        eprintln!("Warning: {}", warning);
    }
    cli.apply_to(&mut config);

    let text = match cli.text {
        Some(text) => text,
        None => read_stdin()?,
    };

    let controller = CopyController::new(
        BackendClipboard::new(config.clipboard.backend),
        TokioTimer::try_current()?,
        config.copy,
    );
    let mut changes = controller.subscribe();

    controller.copy(text).await;

    if let Some(error) = controller.error() {
        return Err(error.into());
    }
    eprintln!("Copied!");

    // Some Linux clipboards only serve content while the owner is alive,
    // so hold on until the copied window closes.
    if !cli.no_wait {
        changes.wait_for(|status| !status.copied).await?;
        log::debug!("Copy feedback reset");
    }

    Ok(())
}

fn read_stdin() -> io::Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}
