//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `auction_structure` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Writing the JSON report
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use auction_structure::app::load_sites;
use auction_structure::initialization::init_logger_with;
use auction_structure::{run_analysis, AnalysisReport, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(&config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("auction_structure error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(config: &Config) -> Result<()> {
    let targets = load_sites(&config.file)?;
    let results = run_analysis(config, targets)
        .await
        .context("Failed to initialize HTTP client")?;

    let report = AnalysisReport::new(&results);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!(
                "✅ Analyzed {} site{} ({} success, {} without patterns, {} failed) - report saved to {}",
                report.summary.total,
                if report.summary.total == 1 { "" } else { "s" },
                report.summary.success,
                report.summary.no_patterns_found,
                report.summary.errors + report.summary.timeouts,
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
