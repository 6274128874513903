//! stepreport CLI - Main Entry Point
//!
//! Re-renders and inspects saved step reports, and runs a one-page smoke
//! check through Playwright.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stepreport::ReporterConfig;

mod commands;
mod output;

use commands::{render, smoke, summary};

/// stepreport CLI - step reports for browser-driven E2E runs
#[derive(Parser)]
#[command(name = "stepreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Reporter configuration file
    #[arg(short, long, default_value = "stepreport.toml", global = true, env = "STEPREPORT_CONFIG")]
    config: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-render a saved JSON report into the configured formats
    Render(render::RenderArgs),

    /// Show statistics of a saved JSON report
    Summary(summary::SummaryArgs),

    /// Open one page, screenshot it and write a report
    Smoke(smoke::SmokeArgs),

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    if !run(cli)? {
        std::process::exit(1);
    }
    Ok(())
}

/// Dispatch one command; the reporter config is only read by commands that write reports
fn run(cli: Cli) -> anyhow::Result<bool> {
    let success = match cli.command {
        Commands::Render(args) => render::execute(args, ReporterConfig::load(&cli.config)?)?,
        Commands::Summary(args) => summary::execute(args, cli.format)?,
        Commands::Smoke(args) => smoke::execute(args, ReporterConfig::load(&cli.config)?)?,
        Commands::Version => {
            println!("stepreport v{}", env!("CARGO_PKG_VERSION"));
            true
        }
    };
    Ok(success)
}
