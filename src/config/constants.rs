//! Configuration constants.
//!
//! This module defines the operational parameters used throughout the engine:
//! network timeouts, per-site budgets, output caps, and the fixed fallback tables.

// Defaults for `Config`
/// Maximum site analyses in flight at once (admission gate size)
pub const DEFAULT_MAX_CONCURRENT: usize = 5;
/// Per-fetch total timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Per-fetch TCP connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;
/// Retries after the first attempt (only transient failures are retried)
pub const DEFAULT_MAX_RETRIES: usize = 2;
/// Fixed delay between attempts of the same fetch
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
/// Total pages fetched per site, home page included
pub const DEFAULT_MAX_PAGES: usize = 10;
/// Minimum interval between two sequential requests to the same site
pub const DEFAULT_REQUEST_INTERVAL_MS: u64 = 500;
/// Progress is logged every time this many sites complete (and at the end)
pub const PROGRESS_LOG_EVERY: usize = 10;

/// Default User-Agent string for HTTP requests.
///
/// A desktop Chrome string. Combined with the pt-BR header set in
/// `fetch::request` it gets past the most trivial bot filters on Brazilian
/// auction sites. Users can override this via `--user-agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Longer bodies are truncated before link extraction
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum input URL length (2048 characters)
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum length of an anchor's surrounding text that still counts as its
/// immediate context for the price heuristic. A parent longer than this is
/// a layout container, not a lot card.
pub const MAX_ANCHOR_CONTEXT_CHARS: usize = 400;

// Output caps
/// Maximum number of crawl start URLs per site
pub const MAX_CRAWL_START_URLS: usize = 5;
/// Maximum number of include paths per site
pub const MAX_INCLUDE_PATHS: usize = 5;
/// Maximum number of ranked patterns kept per site
pub const MAX_PATTERNS: usize = 10;
/// Maximum example URLs kept per pattern
pub const MAX_PATTERN_EXAMPLES: usize = 5;
/// Maximum lot example URLs kept per site
pub const MAX_LOT_EXAMPLES: usize = 20;
/// Occurrence count at which pattern confidence saturates at 1.0
pub const CONFIDENCE_SATURATION: usize = 10;

/// Include paths used when no lot pattern could be inferred.
pub const FALLBACK_INCLUDE_PATHS: &[&str] = &["/lote/", "/item/", "/detalhe/"];

/// Listing paths probed on every site in addition to the ones discovered on the home page.
pub const COMMON_LISTING_PATHS: &[&str] = &[
    "/leiloes",
    "/leilao",
    "/lotes",
    "/catalogo",
    "/imoveis",
    "/veiculos",
    "/busca",
];

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
pub const HTTP_STATUS_BAD_GATEWAY: u16 = 502;
pub const HTTP_STATUS_SERVICE_UNAVAILABLE: u16 = 503;
pub const HTTP_STATUS_GATEWAY_TIMEOUT: u16 = 504;
