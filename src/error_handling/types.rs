//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::{
    HTTP_STATUS_BAD_GATEWAY, HTTP_STATUS_GATEWAY_TIMEOUT, HTTP_STATUS_SERVICE_UNAVAILABLE,
    HTTP_STATUS_TOO_MANY_REQUESTS,
};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for loading the site list.
#[derive(Error, Debug)]
pub enum InputError {
    /// The site list could not be read.
    #[error("Failed to read site list: {0}")]
    Io(#[from] std::io::Error),

    /// The site list contained no usable entries.
    #[error("Site list contains no sites")]
    Empty,
}

/// A single failed fetch attempt.
///
/// These are the four failure classes a page fetch can end in. The fetch layer
/// retries transient ones and folds the last observed failure into a
/// `FetchStatus` instead of returning it as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Non-2xx response.
    #[error("HTTP {code}")]
    Http {
        /// Status code returned by the server
        code: u16,
    },

    /// No response within the configured budget.
    #[error("Timeout - server did not respond in time")]
    Timeout,

    /// DNS, TCP or TLS failure.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// 200 response whose body could not be read or decoded.
    #[error("Unreadable response body: {0}")]
    Parse(String),
}

impl FetchFailure {
    /// Whether another attempt might succeed.
    ///
    /// Connect failures, timeouts and the "come back later" statuses (429, 502,
    /// 503, 504) are transient. Every other status (403, 404, ...) is returned
    /// immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchFailure::Timeout | FetchFailure::Connection(_) => true,
            FetchFailure::Http { code } => matches!(
                *code,
                HTTP_STATUS_TOO_MANY_REQUESTS
                    | HTTP_STATUS_BAD_GATEWAY
                    | HTTP_STATUS_SERVICE_UNAVAILABLE
                    | HTTP_STATUS_GATEWAY_TIMEOUT
            ),
            FetchFailure::Parse(_) => false,
        }
    }
}
