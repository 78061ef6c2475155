//! nuprune - reclaim disk space from the NuGet package cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use nuprune::cli::{Cli, Commands};
use nuprune::config::{Config, ConfigManager};
use nuprune::error::NuPruneResult;
use nuprune::ui;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> NuPruneResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_tracing(cli.verbose, &config);
    debug!("Using config file {}", config_manager.path().display());
    ui::init_theme();

    match cli.command {
        Commands::Prune(args) => nuprune::cli::commands::prune(args, &config).await,
        Commands::Scan(args) => nuprune::cli::commands::scan(args, &config).await,
        Commands::Config(args) => {
            nuprune::cli::commands::config(args, &config_manager, &config).await
        }
    }
}

/// 0 = warn (spinners only), 1 = info, 2+ = debug. Logs go to stderr so
/// machine-readable output on stdout stays clean.
fn init_tracing(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("nuprune=warn"),
        1 => EnvFilter::new("nuprune=info"),
        _ => EnvFilter::new("nuprune=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
