//! Per-site input and output records.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter as EnumIterMacro};

use crate::app::normalize_target_url;
use crate::patterns::PatternCandidate;
use crate::synthesize::CrawlConfig;

/// One site to analyze, as listed in the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteTarget {
    /// Display name.
    pub name: String,
    /// Bare host or full URL.
    pub domain: String,
}

impl SiteTarget {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }

    /// Home URL to start from: `https://` added when no scheme is given,
    /// `www.www.` collapsed. `None` when the domain is not a usable URL.
    pub fn base_url(&self) -> Option<String> {
        normalize_target_url(&self.domain)
    }
}

/// Terminal status of one site analysis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIterMacro,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SiteStatus {
    /// At least one pattern or lot example was found.
    Success,
    /// Pages were reachable but nothing looked like a lot.
    NoPatternsFound,
    /// Home page unreachable (HTTP error, connection failure, bad body) or invalid input.
    Error,
    /// Home page did not answer in time.
    Timeout,
}

/// Everything learned about one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAnalysisResult {
    pub name: String,
    pub domain: String,
    /// Platform detected from the domain (`lel.br`, `superbid`, ..., `custom`).
    pub platform: String,
    pub status: SiteStatus,
    pub base_url: String,
    /// Home URL after redirects.
    pub final_url: String,
    /// Secondary pages that were fetched and contained lot candidates.
    pub listing_pages: Vec<String>,
    pub patterns: Vec<PatternCandidate>,
    pub lot_examples: Vec<String>,
    pub crawl_start_urls: Vec<String>,
    pub include_paths: Vec<String>,
    /// Empty unless `status` is `error` or `timeout`.
    pub error_message: String,
    /// Pages fetched successfully, home included.
    pub pages_visited: usize,
    /// Secondary pages skipped because their fetch failed.
    pub pages_failed: usize,
    /// Links extracted across all fetched pages.
    pub links_analyzed: usize,
    pub analysis_time_ms: u64,
}

impl SiteAnalysisResult {
    /// Empty result for `target`; the analyzer fills it in.
    pub fn new(target: &SiteTarget, platform: &str, base_url: &str) -> Self {
        Self {
            name: target.name.clone(),
            domain: target.domain.clone(),
            platform: platform.to_string(),
            status: SiteStatus::NoPatternsFound,
            base_url: base_url.to_string(),
            final_url: base_url.to_string(),
            listing_pages: Vec::new(),
            patterns: Vec::new(),
            lot_examples: Vec::new(),
            crawl_start_urls: Vec::new(),
            include_paths: Vec::new(),
            error_message: String::new(),
            pages_visited: 0,
            pages_failed: 0,
            links_analyzed: 0,
            analysis_time_ms: 0,
        }
    }

    /// Terminal failure. Crawl configuration stays empty.
    pub fn failed(
        target: &SiteTarget,
        platform: &str,
        base_url: &str,
        status: SiteStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            error_message: message.into(),
            ..Self::new(target, platform, base_url)
        }
    }

    pub(crate) fn apply_crawl_config(&mut self, config: CrawlConfig) {
        self.crawl_start_urls = config.crawl_start_urls;
        self.include_paths = config.include_paths;
    }

    pub fn is_success(&self) -> bool {
        self.status == SiteStatus::Success
    }
}
