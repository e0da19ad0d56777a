// Shared test helpers: in-memory page fetchers and analyzer setup.
//
// The analyzer only depends on the `PageFetcher` capability, so most pipeline
// tests swap the network for a map of canned pages.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use auction_structure::{Config, FetchOutcome, FetchStatus, PageFetcher, SiteAnalyzer};

/// Serves canned outcomes by URL; anything else is a 404.
#[derive(Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, FetchOutcome>,
    requests: Mutex<Vec<String>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[allow(dead_code)] // Not every test file uses every helper
impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a 200 page.
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), FetchOutcome::ok(url, html));
        self
    }

    /// Registers a 200 page reached through a redirect.
    pub fn redirect(mut self, url: &str, final_url: &str, html: &str) -> Self {
        self.pages
            .insert(url.to_string(), FetchOutcome::ok(final_url, html));
        self
    }

    /// Registers a failed fetch.
    pub fn failure(mut self, url: &str, status: FetchStatus) -> Self {
        self.pages
            .insert(url.to_string(), FetchOutcome::failed(url, status));
        self
    }

    /// Makes every fetch take `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Highest number of fetches observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        self.requests
            .lock()
            .expect("requests lock")
            .push(url.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchOutcome::failed(url, FetchStatus::HttpError { code: 404 }))
    }
}

/// Panics when asked for a URL containing `trigger`, otherwise delegates.
#[allow(dead_code)]
pub struct PanickingFetcher {
    pub trigger: &'static str,
    pub inner: MemoryFetcher,
}

#[async_trait]
impl PageFetcher for PanickingFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        if url.contains(self.trigger) {
            panic!("fetcher blew up on {url}");
        }
        self.inner.fetch(url).await
    }
}

/// Config with no inter-request delay, so tests run fast.
#[allow(dead_code)]
pub fn fast_config() -> Config {
    Config {
        request_interval_ms: 0,
        retry_delay_ms: 10,
        ..Default::default()
    }
}

/// Analyzer over `fetcher` with `fast_config()`.
#[allow(dead_code)]
pub fn analyzer_for<F: PageFetcher + 'static>(fetcher: Arc<F>) -> SiteAnalyzer {
    SiteAnalyzer::new(fetcher, &fast_config())
}
