use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// Immutable outcome of one crawl invocation
///
/// `word_counts` holds at most `popularWordCount` entries, already in rank
/// order. Serializes as
/// `{"wordCounts": {"word": count, ...}, "urlsVisited": n}` with the map keys
/// in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    word_counts: Vec<(String, u64)>,
    urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Ranked `(word, count)` pairs
    pub fn word_counts(&self) -> &[(String, u64)] {
        &self.word_counts
    }

    /// Number of distinct URLs claimed during the crawl
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }

    /// Looks up the count of a single ranked word
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, c)| *c)
    }
}

/// Serializes ranked pairs as a JSON object without losing their order
struct RankedWords<'a>(&'a [(String, u64)]);

impl Serialize for RankedWords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(w, c)| (w, c)))
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &RankedWords(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}
