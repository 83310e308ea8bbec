use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::parse_html;
use crate::url::PatternSet;
use crate::CrawlerError;
use reqwest::Client;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// What one page contributes to a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    /// Word frequencies for this page only
    pub word_counts: HashMap<String, u64>,

    /// Absolute URLs linked from this page, in document order
    pub links: Vec<String>,
}

/// Capability to fetch and parse a single page
///
/// The crawl engine calls [`PageParser::parse`] once per claimed URL. An
/// error makes that page an empty leaf: it still counts as visited but adds
/// no words and no links.
pub trait PageParser: Send + Sync + 'static {
    fn parse(&self, url: &str) -> impl Future<Output = Result<PageResult, CrawlerError>> + Send;
}

/// Fetches pages over HTTP(S) or from `file:` URLs and parses them as HTML
#[derive(Debug, Clone)]
pub struct HtmlPageParser {
    client: Client,
    ignored_words: PatternSet,
}

impl HtmlPageParser {
    /// Creates a parser with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `request_timeout` - Limit for a single request (zero means the default)
    /// * `ignored_words` - Words fully matching these patterns are not counted
    pub fn new(request_timeout: Duration, ignored_words: PatternSet) -> Result<Self, CrawlerError> {
        Ok(Self {
            client: build_http_client(request_timeout)?,
            ignored_words,
        })
    }

    /// Creates a parser using the configured timeout and ignored words
    pub fn from_config(config: &Config) -> Result<Self, CrawlerError> {
        let ignored_words = PatternSet::new(&config.ignored_words)?;
        Self::new(config.timeout(), ignored_words)
    }
}

impl PageParser for HtmlPageParser {
    fn parse(&self, url: &str) -> impl Future<Output = Result<PageResult, CrawlerError>> + Send {
        async move {
            let url = Url::parse(url)?;
            let page = fetch_page(&self.client, &url).await?;
            let parsed = parse_html(&page.body, &page.final_url, &self.ignored_words);

            tracing::trace!(
                "Parsed {}: {} distinct words, {} links",
                url,
                parsed.word_counts.len(),
                parsed.links.len()
            );

            Ok(PageResult {
                word_counts: parsed.word_counts,
                links: parsed.links,
            })
        }
    }
}
