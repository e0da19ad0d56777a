//! Per-site analysis.
//!
//! A site goes through a short, fixed sequence of phases:
//!
//! ```text
//! pending -> fetching_home -> error | timeout
//!                          -> discovering_listings -> visiting_pages
//!                          -> extracting_patterns -> done(success | no_patterns_found)
//! ```
//!
//! The home page is the only fatal fetch. Secondary pages are visited one at
//! a time, spaced by the configured request interval, and a page that fails
//! to load is skipped.

mod pacer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use url::Url;

use crate::classify::{classify, ClassifierRules};
use crate::config::{Config, COMMON_LISTING_PATHS, MAX_LOT_EXAMPLES};
use crate::fetch::{FetchStatus, PageFetcher};
use crate::grouping::detect_platform;
use crate::links::{canonicalize, extract_links, LinkSet};
use crate::models::{SiteAnalysisResult, SiteStatus, SiteTarget};
use crate::patterns::extract_patterns;
use crate::synthesize::synthesize;

use pacer::RequestPacer;

/// Where a site analysis currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    FetchingHome,
    DiscoveringListings,
    VisitingPages,
    ExtractingPatterns,
    Done(SiteStatus),
}

/// Tracks and logs phase transitions for one site.
struct PhaseLog<'a> {
    site: &'a str,
    current: Phase,
}

impl<'a> PhaseLog<'a> {
    fn new(site: &'a str) -> Self {
        Self {
            site,
            current: Phase::Pending,
        }
    }

    fn enter(&mut self, next: Phase) {
        debug!("{}: {:?} -> {:?}", self.site, self.current, next);
        self.current = next;
    }
}

/// Analyzes one site at a time; share it behind an `Arc` to run many concurrently.
pub struct SiteAnalyzer {
    fetcher: Arc<dyn PageFetcher>,
    rules: ClassifierRules,
    max_pages: usize,
    request_interval: Duration,
}

impl SiteAnalyzer {
    /// Creates an analyzer with the built-in classification rules.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Self {
        Self {
            fetcher,
            rules: ClassifierRules::default(),
            max_pages: config.max_pages.max(1),
            request_interval: config.request_interval(),
        }
    }

    /// Replaces the classification rules.
    pub fn with_rules(mut self, rules: ClassifierRules) -> Self {
        self.rules = rules;
        self
    }

    /// Runs the full analysis for `target`. Never fails: problems end up in the result.
    pub async fn analyze(&self, target: &SiteTarget) -> SiteAnalysisResult {
        let started = Instant::now();
        let platform = detect_platform(&target.domain);

        let mut result = match target.base_url() {
            Some(base_url) => self.analyze_url(target, platform, &base_url).await,
            None => SiteAnalysisResult::failed(
                target,
                platform,
                &target.domain,
                SiteStatus::Error,
                format!("invalid URL: {}", target.domain),
            ),
        };

        result.analysis_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        result
    }

    async fn analyze_url(
        &self,
        target: &SiteTarget,
        platform: &str,
        base_url: &str,
    ) -> SiteAnalysisResult {
        let mut phase = PhaseLog::new(&target.name);
        let mut pacer = RequestPacer::new(self.request_interval);

        phase.enter(Phase::FetchingHome);
        pacer.wait().await;
        let home = self.fetcher.fetch(base_url).await;
        let Some(home_html) = home.html() else {
            let status = match home.status {
                FetchStatus::Timeout => SiteStatus::Timeout,
                _ => SiteStatus::Error,
            };
            warn!("{}: home page {} failed: {}", target.name, base_url, home.status);
            phase.enter(Phase::Done(status));
            return SiteAnalysisResult::failed(
                target,
                platform,
                base_url,
                status,
                home.status.to_string(),
            );
        };

        let mut result = SiteAnalysisResult::new(target, platform, base_url);
        result.final_url = home.final_url.clone();
        result.pages_visited = 1;

        phase.enter(Phase::DiscoveringListings);
        let home_page = extract_links(home_html, &home.final_url);
        result.links_analyzed += home_page.links.len();
        let home_links = classify(&home_page.links, &home_page.anchors, &self.rules);

        let mut lots: LinkSet = home_links.lot_candidates.iter().collect();
        let queue = visit_queue(
            &home.final_url,
            base_url,
            &home_links.listing_candidates,
            self.max_pages - 1,
        );
        debug!(
            "{}: {} lot candidates on home, {} pages queued",
            target.name,
            lots.len(),
            queue.len()
        );

        phase.enter(Phase::VisitingPages);
        for page_url in &queue {
            pacer.wait().await;
            let outcome = self.fetcher.fetch(page_url).await;
            let Some(html) = outcome.html() else {
                debug!("{}: skipping {page_url}: {}", target.name, outcome.status);
                result.pages_failed += 1;
                continue;
            };
            result.pages_visited += 1;

            let page = extract_links(html, &outcome.final_url);
            result.links_analyzed += page.links.len();
            let classified = classify(&page.links, &page.anchors, &self.rules);

            if !classified.lot_candidates.is_empty()
                && !result.listing_pages.contains(&outcome.final_url)
            {
                result.listing_pages.push(outcome.final_url.clone());
            }
            for lot in classified.lot_candidates.iter() {
                lots.insert(lot);
            }
        }

        phase.enter(Phase::ExtractingPatterns);
        let lot_urls = lots.into_vec();
        result.patterns = extract_patterns(&lot_urls);
        result.lot_examples = lot_urls.into_iter().take(MAX_LOT_EXAMPLES).collect();
        result.apply_crawl_config(synthesize(
            &result.final_url,
            &result.listing_pages,
            &result.patterns,
        ));

        result.status = if !result.patterns.is_empty() || !result.lot_examples.is_empty() {
            SiteStatus::Success
        } else {
            SiteStatus::NoPatternsFound
        };
        phase.enter(Phase::Done(result.status));

        result
    }
}

/// Secondary pages to visit, in order: listing candidates from the home page,
/// then the common listing paths on the home origin. De-duplicated, without
/// the home page itself, at most `budget` entries.
fn visit_queue(final_url: &str, base_url: &str, listings: &LinkSet, budget: usize) -> Vec<String> {
    let mut queue: LinkSet = listings.iter().collect();
    if let Ok(origin) = Url::parse(final_url) {
        for path in COMMON_LISTING_PATHS {
            if let Some(url) = origin.join(path).ok().as_ref().and_then(canonicalize) {
                queue.insert(url);
            }
        }
    }

    queue
        .into_vec()
        .into_iter()
        .filter(|url| !same_page(url, final_url) && !same_page(url, base_url))
        .take(budget)
        .collect()
}

fn same_page(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}
