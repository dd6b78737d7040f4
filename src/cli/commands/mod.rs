//! CLI command implementations

pub mod clear;
pub mod completions;
pub mod config;
pub mod put;
pub mod restore;
pub mod show;
pub mod stages;
pub mod status;

pub use clear::execute as clear;
pub use completions::execute as completions;
pub use config::execute as config;
pub use put::execute as put;
pub use restore::execute as restore;
pub use show::execute as show;
pub use stages::execute as stages;
pub use status::{completed, missing, execute as status};

use crate::cache::ArtifactCache;
use crate::config::Config;
use crate::error::StageCacheResult;

/// Open the configured cache with a fresh session
fn open_cache(config: &Config) -> StageCacheResult<ArtifactCache> {
    ArtifactCache::from_config(&config.cache, Default::default())
}

/// Print a list of stage ids in the requested format
fn print_stage_ids(ids: &[&str], format: crate::cli::OutputFormat) -> StageCacheResult<()> {
    use crate::cli::OutputFormat;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(ids)?),
        OutputFormat::Plain | OutputFormat::Table => {
            for id in ids {
                println!("{}", id);
            }
        }
    }
    Ok(())
}
