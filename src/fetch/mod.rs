//! Page fetching.
//!
//! The analyzer only ever talks to a [`PageFetcher`]: one URL in, one
//! [`FetchOutcome`] out. Failures are data, not errors, so a site analysis can
//! decide for itself which ones are fatal. [`HttpFetcher`] is the direct HTTP
//! backend; a scrape-API backend or a test double implements the same trait.

mod http;
mod request;


use std::fmt;

use async_trait::async_trait;

use crate::error_handling::FetchFailure;

pub use http::HttpFetcher;
pub(crate) use request::RequestHeaders;

/// Capability to retrieve one page.
///
/// Implementations own their own timeout and retry policy. `fetch` never
/// fails: every failure class is folded into [`FetchStatus`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, following redirects.
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// How a single page fetch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// 2xx with a readable body.
    Ok,
    /// Non-2xx response.
    HttpError {
        /// Status code of the last attempt
        code: u16,
    },
    /// No response within the configured budget.
    Timeout,
    /// DNS, TCP or TLS failure.
    ConnectionError(String),
    /// The response arrived but the body was empty or could not be decoded.
    ParseError(String),
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Ok => write!(f, "OK"),
            FetchStatus::HttpError { code } => write!(f, "HTTP {code}"),
            FetchStatus::Timeout => write!(f, "Timeout - server did not respond in time"),
            FetchStatus::ConnectionError(msg) => write!(f, "Connection failed: {msg}"),
            FetchStatus::ParseError(msg) => write!(f, "Unreadable response body: {msg}"),
        }
    }
}

impl From<FetchFailure> for FetchStatus {
    fn from(failure: FetchFailure) -> Self {
        match failure {
            FetchFailure::Http { code } => FetchStatus::HttpError { code },
            FetchFailure::Timeout => FetchStatus::Timeout,
            FetchFailure::Connection(msg) => FetchStatus::ConnectionError(msg),
            FetchFailure::Parse(msg) => FetchStatus::ParseError(msg),
        }
    }
}

/// Result of one page fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// HTML body; present only when `status` is `Ok`.
    pub body: Option<String>,
    /// URL after redirects (the requested URL when no response was received).
    pub final_url: String,
    /// Outcome classification.
    pub status: FetchStatus,
}

impl FetchOutcome {
    /// Successful fetch.
    pub fn ok(final_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            final_url: final_url.into(),
            status: FetchStatus::Ok,
        }
    }

    /// Failed fetch of `url`.
    pub fn failed(url: impl Into<String>, status: FetchStatus) -> Self {
        Self {
            body: None,
            final_url: url.into(),
            status,
        }
    }

    /// Returns the body when the fetch succeeded.
    pub fn html(&self) -> Option<&str> {
        match self.status {
            FetchStatus::Ok => self.body.as_deref(),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == FetchStatus::Ok
    }
}
