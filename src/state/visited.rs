use dashmap::DashSet;

/// Set of URLs claimed during one crawl invocation
///
/// A URL is claimed by exactly one caller: [`VisitedLedger::claim`] is a
/// single insert-if-absent, so two tasks that discover the same URL at the
/// same time cannot both win it.
#[derive(Debug, Default)]
pub struct VisitedLedger {
    urls: DashSet<String>,
}

impl VisitedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to claim `url`
    ///
    /// # Returns
    ///
    /// * `true` - This call inserted the URL; the caller must fetch it
    /// * `false` - Some earlier call already holds the claim
    pub fn claim(&self, url: &str) -> bool {
        // Shard lookup first so the common "already visited" path does not
        // allocate a String.
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    /// Number of URLs claimed so far
    ///
    /// Only meaningful as a final count once every task has finished.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }
}
