//! stagecache - pipeline artifact cache CLI
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use stagecache::cli::{Cli, Commands};
use stagecache::config::{Config, ConfigManager};
use stagecache::error::StageCacheResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
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

fn run() -> StageCacheResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = config_manager.load()?;

    init_logging(cli.verbose, &config);

    if let Some(root) = cli.root {
        debug!("Artifacts root overridden: {}", root.display());
        config.cache.root_dir = Some(root);
    }

    match cli.command {
        Commands::Stages { format } => stagecache::cli::commands::stages(format),
        Commands::Status(args) => stagecache::cli::commands::status(args, &config),
        Commands::Missing { format } => stagecache::cli::commands::missing(format, &config),
        Commands::Completed { format } => stagecache::cli::commands::completed(format, &config),
        Commands::Restore(args) => stagecache::cli::commands::restore(args, &config),
        Commands::Show(args) => stagecache::cli::commands::show(args, &config),
        Commands::Put(args) => stagecache::cli::commands::put(args, &config),
        Commands::Clear(args) => stagecache::cli::commands::clear(args, &config),
        Commands::Config(args) => stagecache::cli::commands::config(args, &config, &config_manager),
        Commands::Completions { shell } => stagecache::cli::commands::completions(shell),
    }
}

/// 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("stagecache=warn"),
        1 => EnvFilter::new("stagecache=info"),
        _ => EnvFilter::new("stagecache=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.json_logs() {
        builder.json().init();
    } else {
        builder.init();
    }
}
