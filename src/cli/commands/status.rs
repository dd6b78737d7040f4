//! Status commands - per-stage presence, missing and completed lists

use crate::cache::{CacheStatus, StageStatus};
use crate::cli::args::StatusArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::StageCacheResult;
use console::style;

use super::{open_cache, print_stage_ids};

/// Execute the status command
pub fn execute(args: StatusArgs, config: &Config) -> StageCacheResult<()> {
    let mut cache = open_cache(config)?;
    if args.restore {
        cache.restore_all(false);
    }

    let status = cache.status();
    match args.format {
        OutputFormat::Table => print_table(&status, &cache.root().display().to_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Plain => print_plain(&status),
    }
    Ok(())
}

/// Execute the missing command
pub fn missing(format: OutputFormat, config: &Config) -> StageCacheResult<()> {
    let cache = open_cache(config)?;
    print_stage_ids(&cache.missing_stages(), format)
}

/// Execute the completed command
pub fn completed(format: OutputFormat, config: &Config) -> StageCacheResult<()> {
    let cache = open_cache(config)?;
    print_stage_ids(&cache.completed_stages(), format)
}

fn mark(present: bool) -> String {
    if present {
        style("yes").green().to_string()
    } else {
        style("no").dim().to_string()
    }
}

fn print_table(status: &CacheStatus, root: &str) {
    println!("{} {}", style("Artifacts:").bold(), root);
    println!();
    println!(
        "{:<28} {:<10} {:<10} {:<20}",
        style("STAGE").bold(),
        style("SESSION").bold(),
        style("FILE").bold(),
        style("MODIFIED").bold()
    );
    println!("{}", "-".repeat(70));

    for entry in status.iter() {
        let modified = entry
            .modified_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<28} {:<10} {:<10} {:<20}",
            entry.stage,
            mark(entry.in_session),
            mark(entry.in_file),
            modified
        );
    }

    let completed = status.iter().filter(|s| s.is_complete()).count();
    println!();
    println!("{}/{} stage(s) completed", completed, status.len());
}

fn print_plain(status: &CacheStatus) {
    for entry in status.iter() {
        println!("{}\t{}", entry.stage, plain_state(entry));
    }
}

fn plain_state(entry: &StageStatus) -> &'static str {
    match (entry.in_session, entry.in_file) {
        (true, true) => "session+file",
        (true, false) => "session",
        (false, true) => "file",
        (false, false) => "missing",
    }
}
