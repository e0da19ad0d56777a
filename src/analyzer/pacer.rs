//! Minimum spacing between sequential requests to one site.

use std::time::Duration;

use tokio::time::Instant;

/// Enforces a minimum interval between consecutive requests.
///
/// One pacer belongs to one site analysis; sites running concurrently each
/// have their own and never wait on each other.
#[derive(Debug)]
pub(crate) struct RequestPacer {
    interval: Duration,
    last_request: Option<Instant>,
}

impl RequestPacer {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: None,
        }
    }

    /// Waits until `interval` has passed since the previous call, then marks now.
    ///
    /// The first call returns immediately.
    pub(crate) async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            tokio::time::sleep_until(last + self.interval).await;
        }
        self.last_request = Some(Instant::now());
    }
}
