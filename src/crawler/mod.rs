//! Crawler module for page fetching and the parallel crawl engine
//!
//! This module contains the core crawling logic, including:
//! - The crawl engine and its per-URL recursive tasks
//! - The bounded worker pool with structured fork/join
//! - Ranking of the final word tally
//! - The page parser capability and its HTTP/file implementation

mod engine;
mod fetcher;
mod page;
mod parser;
mod ranking;
mod scheduler;
mod task;

pub use engine::{CrawlEngine, EngineSettings, WebCrawler};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use page::{HtmlPageParser, PageParser, PageResult};
pub use parser::{normalize_word, parse_html, ParsedPage};
pub use ranking::{popularity_order, rank};
pub use scheduler::{fork_join, pool_size, CrawlFuture, Scheduler};

use crate::config::Config;
use crate::CrawlerError;

/// Builds an engine over the HTML page parser from a validated configuration
///
/// # Example
///
/// ```no_run
/// use ripple_count::config::load_config;
/// use ripple_count::crawler::{build_engine, WebCrawler};
/// use std::path::Path;
///
/// let config = load_config(Path::new("config.json")).unwrap();
/// let engine = build_engine(&config, 4).unwrap();
/// let result = engine.crawl(&config.start_pages);
/// println!("Visited {} pages", result.urls_visited());
/// ```
pub fn build_engine(
    config: &Config,
    hardware_parallelism: usize,
) -> Result<CrawlEngine<HtmlPageParser>, CrawlerError> {
    let settings = EngineSettings::from_config(config, hardware_parallelism)?;
    CrawlEngine::new(settings, HtmlPageParser::from_config(config)?)
}
