//! Input handling and progress reporting.
//!
//! This module provides site-list loading, target URL normalization and the
//! progress log lines emitted while a batch runs.

pub mod logging;
pub mod sites;
pub mod url;

// Re-export public API
pub use logging::{log_progress, log_site_result};
pub use sites::{load_sites, parse_sites};
pub use url::normalize_target_url;
