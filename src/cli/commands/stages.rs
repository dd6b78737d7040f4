//! Stages command - list the catalog

use crate::cache::STAGES;
use crate::cli::OutputFormat;
use crate::error::StageCacheResult;
use console::style;

/// Execute the stages command
pub fn execute(format: OutputFormat) -> StageCacheResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(STAGES)?),
        OutputFormat::Plain => {
            for stage in STAGES {
                println!("{}", stage.id);
            }
        }
        OutputFormat::Table => {
            println!(
                "{:<28} {:<16} {:<36}",
                style("STAGE").bold(),
                style("GROUP").bold(),
                style("FILE").bold()
            );
            println!("{}", "-".repeat(80));
            for stage in STAGES {
                println!("{:<28} {:<16} {:<36}", stage.id, stage.group, stage.file_name);
            }
            println!();
            println!("{} stage(s)", STAGES.len());
        }
    }
    Ok(())
}
