//! Ranking of the final word tally

use std::cmp::Ordering;
use std::collections::HashMap;

/// Selects and orders the `limit` most popular words
///
/// Order is count descending, then word length (in characters) descending,
/// then the word itself ascending. The output has
/// `min(limit, counts.len())` entries and is empty for an empty tally.
///
/// # Example
///
/// ```
/// use ripple_count::crawler::rank;
/// use std::collections::HashMap;
///
/// let counts: HashMap<String, u64> =
///     [("b".to_string(), 2), ("aa".to_string(), 2), ("c".to_string(), 5)].into();
/// let ranked = rank(&counts, 2);
/// assert_eq!(ranked, vec![("c".to_string(), 5), ("aa".to_string(), 2)]);
/// ```
pub fn rank(counts: &HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.iter().map(|(w, c)| (w.as_str(), *c)).collect();
    entries.sort_unstable_by(|a, b| popularity_order(*a, *b));

    entries
        .into_iter()
        .take(limit)
        .map(|(word, count)| (word.to_string(), count))
        .collect()
}

/// Total order used by [`rank`]; `Less` means `a` ranks before `b`
pub fn popularity_order(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(b.0))
}
