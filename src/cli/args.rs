//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// stagecache - pipeline artifact cache
///
/// Inspect, restore and clear the cached outputs of pipeline stages so an
/// interrupted session can resume without recomputation.
#[derive(Parser, Debug)]
#[command(name = "stagecache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "STAGECACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Artifacts directory (overrides cache.root_dir)
    #[arg(short, long, global = true, env = "STAGECACHE_ROOT")]
    pub root: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the stage catalog
    Stages {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show per-stage presence in the session and on disk
    Status(StatusArgs),

    /// List stages with no cached result
    Missing {
        /// Output format
        #[arg(short, long, default_value = "plain")]
        format: OutputFormat,
    },

    /// List stages with a cached result
    Completed {
        /// Output format
        #[arg(short, long, default_value = "plain")]
        format: OutputFormat,
    },

    /// Load every persisted stage into a session and report the outcome
    Restore(RestoreArgs),

    /// Print a stage's persisted artifact as JSON
    Show(ShowArgs),

    /// Persist a JSON document as a stage's artifact
    Put(PutArgs),

    /// Clear cached stages
    Clear(ClearArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Restore persisted stages into the session before reporting
    #[arg(long)]
    pub restore: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the restore command
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Re-read disk even for stages already in the session
    #[arg(short, long)]
    pub force: bool,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Stage id
    pub stage: String,

    /// Print the tagged form stored on disk instead of plain JSON
    #[arg(long)]
    pub tagged: bool,
}

/// Arguments for the put command
#[derive(Parser, Debug)]
pub struct PutArgs {
    /// Stage id
    pub stage: String,

    /// JSON file to read ("-" for stdin)
    pub input: PathBuf,
}

/// Arguments for the clear command
#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["stage", "all"])))]
pub struct ClearArgs {
    /// Stage id to clear
    pub stage: Option<String>,

    /// Clear every stage
    #[arg(long)]
    pub all: bool,

    /// Also delete the persisted files
    #[arg(long)]
    pub files: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
