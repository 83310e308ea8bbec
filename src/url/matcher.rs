use crate::ConfigError;
use regex::Regex;

/// A set of regular expressions tested with full-string semantics
///
/// A candidate matches the set when it matches any one pattern in its
/// entirety, so `"https://example\.com/.*"` matches
/// `"https://example.com/a"` but `"example"` does not match
/// `"https://example.com/"`.
///
/// # Examples
///
/// ```
/// use ripple_count::url::PatternSet;
///
/// let set = PatternSet::new(&[r"https://example\.com/private/.*"]).unwrap();
/// assert!(set.matches("https://example.com/private/a"));
/// assert!(!set.matches("https://example.com/public"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every pattern, anchoring it at both ends
    ///
    /// # Returns
    ///
    /// * `Ok(PatternSet)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed to compile
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(&format!("^(?:{})$", p))
                    .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if `candidate` fully matches any pattern in the set
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
