//! Error handling.
//!
//! This module provides:
//! - Error type definitions (initialization, input, fetch failures)
//! - Categorization of `reqwest` errors into fetch failure classes
//! - Retry strategy configuration

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, get_retry_strategy};
pub use types::{FetchFailure, InitializationError, InputError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_messages() {
        assert_eq!(FetchFailure::Http { code: 403 }.to_string(), "HTTP 403");
        assert_eq!(
            FetchFailure::Connection("dns error".into()).to_string(),
            "Connection failed: dns error"
        );
        assert!(FetchFailure::Timeout.to_string().starts_with("Timeout"));
    }

    #[test]
    fn test_input_error_messages() {
        assert_eq!(InputError::Empty.to_string(), "Site list contains no sites");
        let io = InputError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(io.to_string().contains("missing"));
    }
}
