//! URL filtering
//!
//! URLs are compared by exact string equality everywhere in the crawler; the
//! only URL-level policy is the ignore list, expressed as full-match regular
//! expressions.

mod matcher;

pub use matcher::PatternSet;
