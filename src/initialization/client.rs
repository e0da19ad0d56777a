//! HTTP client initialization.
//!
//! This module provides the function that builds the shared `reqwest::Client`
//! used by the direct HTTP fetch backend.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::fetch::RequestHeaders;

/// Maximum number of redirect hops followed for one request.
const MAX_REDIRECT_HOPS: usize = 10;

/// Initializes the HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header and the pt-BR browser header set as defaults
/// - Connect and total timeouts from the configuration
/// - Redirect following enabled (up to 10 hops)
/// - Invalid certificates accepted (small auction sites often serve expired ones)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .user_agent(config.user_agent.clone())
        .default_headers(RequestHeaders::header_map())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(Arc::new(client))
}
