//! Restore command - load persisted stages into a session

use crate::cache::{LoadOutcome, StageReport};
use crate::cli::args::RestoreArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{StageCacheError, StageCacheResult};
use crate::ui::{self, UiContext};
use serde::Serialize;

use super::open_cache;

/// Execute the restore command
pub fn execute(args: RestoreArgs, config: &Config) -> StageCacheResult<()> {
    let mut cache = open_cache(config)?;
    let report = cache.restore_all(args.force);

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Plain => print_plain(&report),
        OutputFormat::Table => print_steps(&report),
    }

    let failures = report.failures();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(StageCacheError::User(format!(
            "{} stage(s) could not be restored",
            failures.len()
        )))
    }
}

fn print_steps(report: &StageReport<LoadOutcome>) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Restore");

    for (stage, result) in report.iter() {
        ui::stage_outcome(&ctx, stage, result);
    }

    ui::restore_summary(
        &ctx,
        report.loaded().len(),
        report.len(),
        report.failures().len(),
    );
}

fn print_plain(report: &StageReport<LoadOutcome>) {
    for (stage, result) in report.iter() {
        match result {
            Ok(outcome) => println!("{}\t{}", stage, outcome),
            Err(e) => println!("{}\terror: {}", stage, e),
        }
    }
}

fn print_json(report: &StageReport<LoadOutcome>) -> StageCacheResult<()> {
    #[derive(Serialize)]
    struct RestoreJson<'a> {
        stage: &'a str,
        loaded: bool,
        outcome: Option<LoadOutcome>,
        error: Option<String>,
    }

    let rows: Vec<RestoreJson<'_>> = report
        .iter()
        .map(|(stage, result)| RestoreJson {
            stage,
            loaded: report.succeeded(stage),
            outcome: result.as_ref().ok().copied(),
            error: result.as_ref().err().map(|e| e.to_string()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
