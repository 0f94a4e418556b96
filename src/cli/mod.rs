//! CLI interface using clap
//!
//! Provides the command-line interface for DocCheck

mod commands;

pub use commands::*;

use crate::check::DocCheckMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DocCheck - Documentation completeness checker for public APIs
#[derive(Parser, Debug)]
#[command(name = "doccheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./.doccheck.toml when present)
    #[arg(short, long, global = true, env = "DOCCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check declaration dumps for missing or inconsistent documentation
    Check(CheckArgs),

    /// Show or create configuration
    Config(ConfigArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Declaration dump files, or directories searched for `*.json` dumps
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Checking mode (overrides the configuration file)
    #[arg(short, long)]
    pub mode: Option<DocCheckMode>,

    /// Report findings as errors and exit with status 1 when any is found
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the effective configuration
    #[arg(long)]
    pub show: bool,

    /// Write a default configuration file to the current directory
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["doccheck", "check", "dump.json", "--mode", "consistency"]);
        assert!(matches!(cli.command, Commands::Check(_)));

        if let Commands::Check(args) = cli.command {
            assert_eq!(args.paths, vec![PathBuf::from("dump.json")]);
            assert_eq!(args.mode, Some(DocCheckMode::Consistency));
            assert!(!args.deny_warnings);
        }
    }

    #[test]
    fn test_check_requires_paths() {
        assert!(Cli::try_parse_from(["doccheck", "check"]).is_err());
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["doccheck", "check", "a.json", "-o", "json", "--mode", "presence"]);
        assert_eq!(cli.format, OutputFormat::Json);
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.mode, Some(DocCheckMode::PresenceOnly));
        }
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::parse_from(["doccheck", "config", "--init", "--force"]);
        if let Commands::Config(args) = cli.command {
            assert!(args.init);
            assert!(args.force);
        }
    }
}
