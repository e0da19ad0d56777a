//! Browser-like request headers.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Realistic pt-BR browser request headers.
///
/// Brazilian auction platforms commonly sit behind a WAF that rejects obvious
/// clients. These headers mimic a Chrome session arriving from a Google search
/// with a Portuguese locale; the `User-Agent` itself comes from `Config`.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    const ACCEPT: &'static str =
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
    const ACCEPT_LANGUAGE: &'static str = "pt-BR,pt;q=0.95,en-BR;q=0.9,en;q=0.8";
    const REFERER: &'static str = "https://www.google.com.br/";

    /// Returns the header set as (name, value) pairs.
    pub(crate) fn as_vec() -> Vec<(&'static str, &'static str)> {
        vec![
            ("accept", Self::ACCEPT),
            ("accept-language", Self::ACCEPT_LANGUAGE),
            ("referer", Self::REFERER),
            ("sec-fetch-dest", "document"),
            ("sec-fetch-mode", "navigate"),
            ("sec-fetch-site", "cross-site"),
            ("sec-fetch-user", "?1"),
            ("upgrade-insecure-requests", "1"),
            ("cache-control", "max-age=0"),
        ]
    }

    /// Builds a `HeaderMap` suitable for `ClientBuilder::default_headers`.
    pub(crate) fn header_map() -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in Self::as_vec() {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        headers
    }
}
