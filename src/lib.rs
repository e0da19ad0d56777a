//! auction_structure library: lot-page URL discovery for auction sites
//!
//! Given a list of auction-site domains, this library visits each site's home
//! page and a handful of listing pages, classifies the links it finds, infers
//! the URL template used for individual lot pages, and derives a crawl
//! configuration (seed URLs plus include-path filters) for a downstream crawler.
//!
//! # Example
//!
//! ```no_run
//! use auction_structure::{run_analysis, AnalysisReport, Config, SiteTarget};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     max_concurrent: 10,
//!     ..Default::default()
//! };
//! let targets = vec![SiteTarget::new("Exemplo", "exemplo.lel.br")];
//!
//! let results = run_analysis(&config, targets).await?;
//! let report = AnalysisReport::new(&results);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod analyzer;
pub mod app;
pub mod batch;
pub mod classify;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod grouping;
pub mod initialization;
pub mod links;
pub mod models;
pub mod patterns;
pub mod synthesize;

use std::collections::BTreeMap;
use std::sync::Arc;

use log::info;
use serde::Serialize;

// Re-export public API
pub use analyzer::SiteAnalyzer;
pub use batch::{run_batch, run_batch_with_observer};
pub use config::{Config, LogFormat, LogLevel};
pub use fetch::{FetchOutcome, FetchStatus, HttpFetcher, PageFetcher};
pub use grouping::{group_results, summarize, BatchSummary, SiteGroup};
pub use models::{SiteAnalysisResult, SiteStatus, SiteTarget};
pub use patterns::PatternCandidate;

use error_handling::InitializationError;

/// Everything a run produced, ready to serialize.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub summary: BatchSummary,
    pub results: &'a [SiteAnalysisResult],
    pub groups: BTreeMap<String, SiteGroup<'a>>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(results: &'a [SiteAnalysisResult]) -> Self {
        Self {
            summary: summarize(results),
            results,
            groups: group_results(results),
        }
    }
}

/// Analyzes `targets` over direct HTTP with the settings in `config`.
///
/// # Errors
///
/// Fails only if the HTTP client cannot be built. Per-site failures are
/// reported in the returned results.
pub async fn run_analysis(
    config: &Config,
    targets: Vec<SiteTarget>,
) -> Result<Vec<SiteAnalysisResult>, InitializationError> {
    let fetcher = HttpFetcher::from_config(config)?;
    let analyzer = Arc::new(SiteAnalyzer::new(Arc::new(fetcher), config));

    info!(
        "Analyzing {} sites ({} concurrent, up to {} pages each)",
        targets.len(),
        config.max_concurrent,
        config.max_pages
    );
    Ok(run_batch(targets, analyzer, config.max_concurrent).await)
}
