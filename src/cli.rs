use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "asset-guard")]
#[command(author, version, about = "Find project assets no entry point depends on")]
#[command(long_about = "Lists files that are not reachable from any entry point, \
    grouped by folder, and helps whitelist or delete them.\n\n\
    Exit codes:\n  \
    0 - No unused assets\n  \
    1 - Unused assets found\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Project directory (defaults to the discovered project root)
    #[arg(short = 'C', long, global = true)]
    pub project: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the project and report unused assets
    Scan(ScanArgs),

    /// Manage the whitelist of exempted paths
    Whitelist(WhitelistArgs),

    /// Delete unused assets (dry run unless --yes)
    Delete(DeleteArgs),

    /// Show counts and reclaimable size
    Stats(StatsArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only list the assets of this folder
    #[arg(long)]
    pub folder: Option<String>,
}

#[derive(Args, Debug)]
pub struct WhitelistArgs {
    #[command(subcommand)]
    pub action: WhitelistAction,
}

#[derive(Subcommand, Debug)]
pub enum WhitelistAction {
    /// Exempt files or folders (prefix match; end a folder with '/')
    Add {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the current whitelist
    List {
        /// Output format [possible values: text, json]
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Unused assets to delete (project-relative)
    #[arg(required_unless_present = "all")]
    pub paths: Vec<String>,

    /// Delete every unused asset
    #[arg(long, conflicts_with = "paths")]
    pub all: bool,

    /// Actually delete; without this only report what would be deleted
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path (defaults to .asset-guard.toml in the project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
