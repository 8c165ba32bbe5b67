use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::LOCAL_CONFIG_NAME;
use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "header-guard")]
#[command(author, version, about = "Insert, verify and update license headers in source files")]
#[command(long_about = "Keeps license header comments in source files up to date.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Headers missing or outdated (check), or files that could not be fixed (apply)\n  \
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

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report files whose license header is missing or outdated
    Check(RunArgs),

    /// Insert missing license headers and update outdated ones
    Apply(RunArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),
}

/// Arguments shared by `check` and `apply`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Paths to process (files or directories)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only process files changed since a git reference (branch, tag or commit)
    #[arg(long)]
    pub diff: Option<String>,

    /// Do not honor .gitignore files
    #[arg(long)]
    pub no_gitignore: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = LOCAL_CONFIG_NAME)]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate configuration and license header templates
    Validate {
        /// Path to configuration file (default: discovered)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Display the effective configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format [possible values: text, json]
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
