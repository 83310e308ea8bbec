//! Call-timing profiler
//!
//! A [`Profiler`] hands out decorators that implement the same trait as the
//! object they wrap ([`WebCrawler`](crate::crawler::WebCrawler) or
//! [`PageParser`](crate::crawler::PageParser)) and add the elapsed time of
//! every profiled call to a shared [`ProfilingState`]. Wrapped and unwrapped
//! objects behave identically apart from the recorded timings.
//!
//! # Example
//!
//! ```no_run
//! use ripple_count::config::load_config;
//! use ripple_count::crawler::{CrawlEngine, EngineSettings, HtmlPageParser, WebCrawler};
//! use ripple_count::profiler::Profiler;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(Path::new("config.json"))?;
//! let profiler = Profiler::new();
//! let parser = profiler.wrap_parser(HtmlPageParser::from_config(&config)?);
//! let engine = CrawlEngine::new(EngineSettings::from_config(&config, 4)?, parser)?;
//! let crawler = profiler.wrap_crawler(engine);
//!
//! crawler.crawl(&config.start_pages);
//! profiler.write_data(std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

mod profiled;
mod state;

pub use profiled::{ProfiledCrawler, ProfiledParser};
pub use state::{format_duration, ProfilingState};

use crate::clock::{Clock, SystemClock};
use crate::crawler::{PageParser, WebCrawler};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Creates profiling decorators and reports what they recorded
pub struct Profiler {
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
    start_time: DateTime<Utc>,
}

impl Profiler {
    /// Creates a profiler timing calls with the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Arc::new(ProfilingState::new()),
            start_time: Utc::now(),
        }
    }

    /// Wraps a crawler so that its `crawl` calls are timed
    pub fn wrap_crawler<C: WebCrawler>(&self, crawler: C) -> ProfiledCrawler<C> {
        ProfiledCrawler::new(crawler, Arc::clone(&self.clock), Arc::clone(&self.state))
    }

    /// Wraps a page parser so that its `parse` calls are timed
    pub fn wrap_parser<P: PageParser>(&self, parser: P) -> ProfiledParser<P> {
        ProfiledParser::new(parser, Arc::clone(&self.clock), Arc::clone(&self.state))
    }

    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    /// Writes the report: a `Run at <time>` header, one line per profiled
    /// method, then a blank line
    pub fn write_data<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(
            writer,
            "Run at {}",
            self.start_time.format("%a, %-d %b %Y %H:%M:%S GMT")
        )?;
        self.state.write(&mut writer)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Appends the report to `path`, creating the file if needed
    pub fn write_data_to_path(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_data(BufWriter::new(file))
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
