//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize errors and configure retry strategies.

use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

use super::types::FetchFailure;

/// Creates a fixed-interval retry strategy.
///
/// Yields `max_retries` delays of `delay` each, so an action run under it is
/// attempted at most `max_retries + 1` times.
pub fn get_retry_strategy(delay: Duration, max_retries: usize) -> impl Iterator<Item = Duration> {
    FixedInterval::new(delay).take(max_retries)
}

/// Categorizes a `reqwest::Error` into a `FetchFailure`.
///
/// HTTP status codes are checked first; after that the reqwest error kind
/// decides between timeout, connection and body problems.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchFailure {
    if let Some(status) = error.status() {
        return FetchFailure::Http {
            code: status.as_u16(),
        };
    }

    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_decode() || error.is_body() {
        FetchFailure::Parse(root_cause_message(error))
    } else {
        // connect, request, redirect-loop and builder errors all mean we never got a page
        FetchFailure::Connection(root_cause_message(error))
    }
}

/// Walks the source chain and returns the innermost message.
///
/// reqwest's own `Display` is usually just "error sending request"; the useful
/// part (DNS failure, certificate problem, refused connection) sits deeper.
fn root_cause_message(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message = cause.to_string();
        source = cause.source();
    }
    message
}
