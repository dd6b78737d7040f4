//! Show command - print a persisted artifact

use crate::cli::args::ShowArgs;
use crate::config::Config;
use crate::error::{StageCacheError, StageCacheResult};

use super::open_cache;

/// Execute the show command
pub fn execute(args: ShowArgs, config: &Config) -> StageCacheResult<()> {
    let cache = open_cache(config)?;

    let artifact = cache.read_durable(&args.stage)?.ok_or_else(|| {
        StageCacheError::User(format!("Stage {} has not been persisted", args.stage))
    })?;

    let json = if args.tagged {
        serde_json::to_string_pretty(&artifact)?
    } else {
        serde_json::to_string_pretty(&artifact.to_json())?
    };
    println!("{}", json);
    Ok(())
}
