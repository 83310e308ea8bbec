use dashmap::DashMap;
use std::collections::HashMap;

/// Running per-word totals shared by every task of one crawl invocation
///
/// Merges are per-key atomic additions, so the final totals do not depend on
/// the order in which concurrent pages are merged.
#[derive(Debug, Default)]
pub struct WordAggregator {
    totals: DashMap<String, u64>,
}

impl WordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one page's word counts into the running totals
    pub fn merge(&self, page_counts: &HashMap<String, u64>) {
        for (word, count) in page_counts {
            // get_mut avoids cloning the key for words already seen
            if let Some(mut total) = self.totals.get_mut(word.as_str()) {
                *total += count;
                continue;
            }
            *self.totals.entry(word.clone()).or_insert(0) += count;
        }
    }

    /// Copies the current totals
    ///
    /// Taken by the engine only after all crawl tasks have completed.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.totals
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Number of distinct words seen
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
