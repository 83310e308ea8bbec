//! HTML parser for extracting words and links
//!
//! This module handles parsing HTML content to extract:
//! - Word frequencies of the visible text
//! - Links to follow (from `<a href>` tags)

use crate::url::PatternSet;
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text is never counted
const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Occurrences of each normalized word on this page
    pub word_counts: HashMap<String, u64>,

    /// All links found on the page (absolute URLs), in document order
    pub links: Vec<String>,
}

/// Parses HTML content and extracts words and links
///
/// # Word Rules
///
/// Visible text is split on whitespace; every non-word character is removed
/// from each piece and the rest is lowercased. Empty results and words fully
/// matching `ignored_words` are dropped.
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` resolved against `base_url`, keeping
/// `http`, `https` and `file` URLs.
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:` and `data:` links,
/// fragment-only links and `<a download>`.
///
/// # Example
///
/// ```
/// use ripple_count::crawler::parse_html;
/// use ripple_count::url::PatternSet;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello, hello world!</p><a href="/next">Next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url, &PatternSet::default());
/// assert_eq!(parsed.word_counts["hello"], 2);
/// assert_eq!(parsed.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &PatternSet) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: extract_words(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the words of every visible text node
fn extract_words(document: &Html, ignored_words: &PatternSet) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        for raw in text.split_whitespace() {
            let Some(word) = normalize_word(raw) else {
                continue;
            };
            if ignored_words.matches(&word) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
}

/// Strips non-word characters and lowercases; `None` if nothing is left
pub fn normalize_word(raw: &str) -> Option<String> {
    let word: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect();

    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Schemes other than http, https and file after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" | "file" => Some(absolute_url.to_string()),
        _ => None,
    }
}
