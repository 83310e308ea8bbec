//! Ripple-Count: a depth- and time-bounded parallel web crawler
//!
//! This crate walks a web graph from a set of seed URLs, fetches and parses
//! every reachable page exactly once, sums the word frequencies of all pages
//! into a single tally and reports the most popular words together with the
//! number of distinct pages visited.

pub mod clock;
pub mod config;
pub mod crawler;
pub mod output;
pub mod profiler;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Ripple-Count operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Unsupported URL scheme for {url}")]
    UnsupportedScheme { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to start worker pool: {0}")]
    Scheduler(#[source] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for Ripple-Count operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, EngineSettings, PageParser, PageResult, WebCrawler};
pub use output::CrawlResult;
pub use state::{VisitedLedger, WordAggregator};
