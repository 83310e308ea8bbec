//! Shared crawl state
//!
//! The only mutable state shared between crawl tasks lives here, behind two
//! narrow interfaces:
//!
//! - `VisitedLedger`: atomic claim of a URL, giving exactly-once visitation
//! - `WordAggregator`: atomic per-word accumulation of page word counts
//!
//! Both are created fresh for each crawl invocation.

mod aggregator;
mod visited;

pub use aggregator::WordAggregator;
pub use visited::VisitedLedger;
