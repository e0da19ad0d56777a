//! Crawl configuration synthesis.

use serde::{Deserialize, Serialize};

use crate::config::{FALLBACK_INCLUDE_PATHS, MAX_CRAWL_START_URLS, MAX_INCLUDE_PATHS};
use crate::patterns::PatternCandidate;

/// Seeds and include filters for the downstream crawler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlConfig {
    pub crawl_start_urls: Vec<String>,
    pub include_paths: Vec<String>,
}

/// Builds a crawl configuration from what the analysis found.
///
/// Start URLs are the final home URL followed by distinct listing pages in
/// discovery order, five at most. Include paths are the ranked patterns,
/// de-duplicated, five at most; with no patterns the fixed fallback set
/// (`/lote/`, `/item/`, `/detalhe/`) is used.
pub fn synthesize(
    final_url: &str,
    listing_pages: &[String],
    patterns: &[PatternCandidate],
) -> CrawlConfig {
    let mut crawl_start_urls = vec![final_url.to_string()];
    for page in listing_pages {
        if crawl_start_urls.len() >= MAX_CRAWL_START_URLS {
            break;
        }
        if !crawl_start_urls.contains(page) {
            crawl_start_urls.push(page.clone());
        }
    }

    let mut include_paths: Vec<String> = Vec::new();
    for candidate in patterns {
        if include_paths.len() >= MAX_INCLUDE_PATHS {
            break;
        }
        if !include_paths.contains(&candidate.pattern) {
            include_paths.push(candidate.pattern.clone());
        }
    }
    if include_paths.is_empty() {
        include_paths = FALLBACK_INCLUDE_PATHS.iter().map(|p| p.to_string()).collect();
    }

    CrawlConfig {
        crawl_start_urls,
        include_paths,
    }
}
