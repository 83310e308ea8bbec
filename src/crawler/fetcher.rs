//! Page loading
//!
//! This module handles getting raw page bytes, including:
//! - Building the HTTP client with the crawler's user agent
//! - GET requests for `http`/`https` URLs
//! - Content-Type checking (only HTML is parsed)
//! - Reading `file:` URLs from the local filesystem

use crate::CrawlerError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Upper bound for a single request when no crawl timeout applies
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A page body ready for parsing
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the body was actually served from, after redirects
    pub final_url: Url,
    /// Raw HTML
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// A zero `request_timeout` falls back to a 30 second limit.
pub fn build_http_client(request_timeout: Duration) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let timeout = if request_timeout.is_zero() {
        DEFAULT_REQUEST_TIMEOUT
    } else {
        request_timeout
    };

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Loads the page at `url`
///
/// # Returns
///
/// * `Ok(FetchedPage)` - HTML body and the URL it came from
/// * `Err(CrawlerError)` - Network failure, non-2xx status, non-HTML
///   content, unreadable file or unsupported scheme
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, CrawlerError> {
    match url.scheme() {
        "http" | "https" => fetch_http(client, url).await,
        "file" => read_file(url).await,
        _ => Err(CrawlerError::UnsupportedScheme {
            url: url.to_string(),
        }),
    }
}

async fn fetch_http(client: &Client, url: &Url) -> Result<FetchedPage, CrawlerError> {
    let http_error = |source| CrawlerError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlerError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return Err(CrawlerError::ContentMismatch {
            url: url.to_string(),
            content_type,
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(http_error)?;

    Ok(FetchedPage { final_url, body })
}

async fn read_file(url: &Url) -> Result<FetchedPage, CrawlerError> {
    let path = url
        .to_file_path()
        .map_err(|_| CrawlerError::UnsupportedScheme {
            url: url.to_string(),
        })?;
    let body = tokio::fs::read_to_string(&path).await?;

    Ok(FetchedPage {
        final_url: url.clone(),
        body,
    })
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    mime.eq_ignore_ascii_case("text/html") || mime.eq_ignore_ascii_case("application/xhtml+xml")
}
