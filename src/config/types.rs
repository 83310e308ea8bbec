use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for Ripple-Count
///
/// Keys are camelCase in both the JSON and TOML forms. Every key is optional;
/// missing keys take the values from [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    /// Seed URLs the crawl starts from, in order
    pub start_pages: Vec<String>,

    /// URLs fully matching any of these regular expressions are never visited
    pub ignored_urls: Vec<String>,

    /// Words fully matching any of these regular expressions are not counted
    pub ignored_words: Vec<String>,

    /// Requested number of worker threads (capped by hardware concurrency)
    pub parallelism: Option<usize>,

    /// Maximum number of link hops from a seed, including the seed itself
    pub max_depth: u32,

    /// Wall-clock budget after which no new page fetch may start
    pub timeout_seconds: u64,

    /// Number of entries kept in the ranked word list
    pub popular_word_count: usize,

    /// Where the profiling report is appended (empty means stdout)
    pub profile_output_path: String,

    /// Where the crawl result is written (empty means stdout)
    pub result_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_pages: Vec::new(),
            ignored_urls: Vec::new(),
            ignored_words: Vec::new(),
            parallelism: None,
            max_depth: 0,
            timeout_seconds: 1,
            popular_word_count: 0,
            profile_output_path: String::new(),
            result_path: String::new(),
        }
    }
}

impl Config {
    /// The crawl timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Requested parallelism, falling back to `hardware_parallelism`
    pub fn parallelism_or(&self, hardware_parallelism: usize) -> usize {
        self.parallelism.unwrap_or(hardware_parallelism)
    }

    pub fn result_path(&self) -> Option<&Path> {
        non_empty_path(&self.result_path)
    }

    pub fn profile_output_path(&self) -> Option<&Path> {
        non_empty_path(&self.profile_output_path)
    }
}

fn non_empty_path(raw: &str) -> Option<&Path> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(Path::new(raw))
    }
}

/// Persisted formats a configuration can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension; anything but `.toml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}
