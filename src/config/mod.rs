//! Configuration module for Ripple-Count
//!
//! This module handles loading, parsing, and validating crawl configuration
//! files (JSON, or TOML for files ending in `.toml`).
//!
//! # Example
//!
//! ```no_run
//! use ripple_count::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.json")).unwrap();
//! println!("Crawler will use max depth: {}", config.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, ConfigFormat};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
