//! DocCheck - Documentation completeness checker
//!
//! Checks declaration dumps of compiled modules for public API that is
//! undocumented or whose documentation disagrees with its signature.

use anyhow::Result;
use doccheck::cli::{
    check, init_config, print_report_json, print_report_text, show_config, Cli, Commands,
    OutputFormat,
};
use doccheck::CheckConfig;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cwd = Path::new(".");

    // Execute command
    match cli.command {
        Commands::Check(args) => {
            let config = CheckConfig::resolve(cli.config.as_deref(), cwd)?
                .with_overrides(args.mode, args.deny_warnings);
            let report = check(&args.paths, &config)?;

            match cli.format {
                OutputFormat::Json => print_report_json(&report)?,
                OutputFormat::Text => print_report_text(&report),
            }

            if report.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Config(args) => {
            if args.init {
                let path = init_config(cwd, args.force)?;
                println!("✓ Wrote default configuration to {:?}", path);
            }

            if args.show || !args.init {
                let config = CheckConfig::resolve(cli.config.as_deref(), cwd)?;
                show_config(&config)?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
