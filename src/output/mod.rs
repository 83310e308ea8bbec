//! Output module for crawl results
//!
//! This module handles:
//! - The immutable `CrawlResult` produced at the end of a crawl
//! - Serializing results as JSON to a file or any writer

mod result;
mod writer;

pub use result::CrawlResult;
pub use writer::{write_result, write_result_to};
