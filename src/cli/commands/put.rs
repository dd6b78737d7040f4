//! Put command - persist a JSON document as a stage artifact

use crate::cache::Artifact;
use crate::cli::args::PutArgs;
use crate::config::Config;
use crate::error::{StageCacheError, StageCacheResult};
use crate::ui::{self, UiContext};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

use super::open_cache;

/// Execute the put command
pub fn execute(args: PutArgs, config: &Config) -> StageCacheResult<()> {
    let cache = open_cache(config)?;
    let content = read_input(&args.input)?;

    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| StageCacheError::User(format!("Input is not valid JSON: {}", e)))?;
    let artifact = Artifact::from_json(value);
    debug!("Parsed {} artifact for {}", artifact.kind(), args.stage);

    cache.write_durable(&args.stage, &artifact)?;

    let ctx = UiContext::detect();
    if artifact.is_usable() {
        ui::step_ok_detail(&ctx, &format!("Saved {}", args.stage), artifact.kind());
    } else {
        ui::step_warn_hint(
            &ctx,
            &format!("Saved {}, but the artifact is empty", args.stage),
            "empty artifacts do not count as loaded in a session",
        );
    }
    Ok(())
}

fn read_input(input: &Path) -> StageCacheResult<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| StageCacheError::io("reading stdin", e))?;
        return Ok(buf);
    }

    fs::read_to_string(input)
        .map_err(|e| StageCacheError::io(format!("reading {}", input.display()), e))
}
