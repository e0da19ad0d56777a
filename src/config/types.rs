//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. `Config` doubles as the library configuration: it can be
//! built programmatically through `Default` without touching the CLI.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENT, DEFAULT_MAX_PAGES, DEFAULT_MAX_RETRIES,
    DEFAULT_REQUEST_INTERVAL_MS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Analysis configuration.
///
/// # Examples
///
/// ```no_run
/// use auction_structure::Config;
///
/// let config = Config {
///     max_concurrent: 10,
///     max_pages: 5,
///     ..Default::default()
/// };
/// assert_eq!(config.max_pages, 5);
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "auction_structure",
    about = "Discovers lot-page URL patterns on auction sites and derives crawl configurations."
)]
pub struct Config {
    /// Site list: one `name,domain` pair per line (`#` comments and a header row are skipped)
    #[arg(value_parser, default_value = "sites.csv")]
    pub file: PathBuf,

    /// Write the JSON report here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum number of sites analyzed concurrently
    #[arg(long, short = 'c', default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,

    /// Per-request total timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Per-request connect timeout in seconds
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_seconds: u64,

    /// Retries after the first attempt for transient failures (connect error, timeout, 503)
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: usize,

    /// Fixed delay between attempts of one request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,

    /// Maximum pages fetched per site, home page included
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Minimum interval between sequential requests to one site, in milliseconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_INTERVAL_MS)]
    pub request_interval_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Config {
    /// Total per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Per-request connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Delay between retry attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Minimum interval between sequential page requests within one site.
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("sites.csv"),
            output: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            max_pages: DEFAULT_MAX_PAGES,
            request_interval_ms: DEFAULT_REQUEST_INTERVAL_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.request_interval(), Duration::from_millis(500));
        assert!(config.output.is_none());
    }

    #[test]
    fn test_config_parse_matches_default() {
        // Parsing with only the positional argument must give the same values as Default
        let parsed = Config::parse_from(["auction_structure", "sites.csv"]);
        let default = Config::default();
        assert_eq!(parsed.file, default.file);
        assert_eq!(parsed.max_concurrent, default.max_concurrent);
        assert_eq!(parsed.timeout_seconds, default.timeout_seconds);
        assert_eq!(parsed.connect_timeout_seconds, default.connect_timeout_seconds);
        assert_eq!(parsed.max_retries, default.max_retries);
        assert_eq!(parsed.retry_delay_ms, default.retry_delay_ms);
        assert_eq!(parsed.max_pages, default.max_pages);
        assert_eq!(parsed.request_interval_ms, default.request_interval_ms);
        assert_eq!(parsed.user_agent, default.user_agent);
    }

    #[test]
    fn test_config_parse_overrides() {
        let parsed = Config::parse_from([
            "auction_structure",
            "leiloes.csv",
            "--max-concurrent",
            "20",
            "--max-pages",
            "4",
            "--log-format",
            "json",
            "-o",
            "out.json",
        ]);
        assert_eq!(parsed.file, PathBuf::from("leiloes.csv"));
        assert_eq!(parsed.max_concurrent, 20);
        assert_eq!(parsed.max_pages, 4);
        assert!(matches!(parsed.log_format, LogFormat::Json));
        assert_eq!(parsed.output, Some(PathBuf::from("out.json")));
    }
}
