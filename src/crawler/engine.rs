//! Crawl engine - orchestration of one crawl invocation
//!
//! For every call to `crawl` the engine:
//! 1. Computes the absolute deadline from the configured timeout
//! 2. Creates a fresh visited ledger and word aggregator
//! 3. Submits one root task per seed URL to its scheduler
//! 4. Waits until every root task and all of their descendants are done
//! 5. Ranks the aggregate and packages the result

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::crawler::page::PageParser;
use crate::crawler::ranking::rank;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::task::{CrawlTask, TaskContext};
use crate::output::CrawlResult;
use crate::state::{VisitedLedger, WordAggregator};
use crate::url::PatternSet;
use crate::{ConfigError, CrawlerError};
use std::sync::Arc;
use std::time::Duration;

/// Something that can crawl from a list of seed URLs
///
/// Implemented by [`CrawlEngine`] and by the profiling decorator that wraps
/// it; both honor the same contract.
pub trait WebCrawler {
    /// Crawls from `seeds` and returns the ranked result
    fn crawl(&self, seeds: &[String]) -> CrawlResult;

    /// Upper bound on the number of worker threads this crawler may use
    fn max_parallelism(&self) -> usize;
}

/// Parameters fixed for the lifetime of an engine
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Hop budget given to every seed
    pub max_depth: u32,

    /// Time after the start of a crawl at which no new fetch may begin
    pub timeout: Duration,

    /// Number of ranked words kept in the result
    pub popular_word_count: usize,

    /// URLs fully matching any of these are never visited
    pub ignored_urls: PatternSet,

    /// Requested worker count
    pub parallelism: usize,

    /// Hardware concurrency, caps `parallelism`
    pub hardware_parallelism: usize,
}

impl EngineSettings {
    /// Builds engine settings from a validated configuration
    ///
    /// `hardware_parallelism` is passed in rather than read from the process
    /// so the pool size is fully determined by the caller.
    pub fn from_config(config: &Config, hardware_parallelism: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            max_depth: config.max_depth,
            timeout: config.timeout(),
            popular_word_count: config.popular_word_count,
            ignored_urls: PatternSet::new(&config.ignored_urls)?,
            parallelism: config.parallelism_or(hardware_parallelism),
            hardware_parallelism,
        })
    }
}

/// Parallel crawler over a fixed worker pool
///
/// # Panics
///
/// `crawl` blocks on the engine's own runtime, so it panics when called from
/// inside an async context. Dropping the engine there panics as well. Async
/// callers should create, use and drop it on a thread of its own.
pub struct CrawlEngine<P> {
    settings: EngineSettings,
    parser: Arc<P>,
    clock: Arc<dyn Clock>,
    ignored_urls: Arc<PatternSet>,
    scheduler: Scheduler,
}

impl<P: PageParser> CrawlEngine<P> {
    /// Creates an engine using the system clock
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Engine with a running worker pool
    /// * `Err(CrawlerError::Scheduler)` - The worker pool could not be started
    pub fn new(settings: EngineSettings, parser: P) -> Result<Self, CrawlerError> {
        Self::with_clock(settings, parser, Arc::new(SystemClock))
    }

    /// Creates an engine that reads time from `clock`
    pub fn with_clock(
        settings: EngineSettings,
        parser: P,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CrawlerError> {
        let scheduler = Scheduler::new(settings.parallelism, settings.hardware_parallelism)?;

        Ok(Self {
            ignored_urls: Arc::new(settings.ignored_urls.clone()),
            settings,
            parser: Arc::new(parser),
            clock,
            scheduler,
        })
    }

    /// Number of worker threads actually in the pool
    pub fn workers(&self) -> usize {
        self.scheduler.workers()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

impl<P: PageParser> WebCrawler for CrawlEngine<P> {
    fn crawl(&self, seeds: &[String]) -> CrawlResult {
        // A timeout too large to represent means no deadline at all
        let deadline = self.clock.now().checked_add(self.settings.timeout);
        if deadline.is_none() {
            tracing::debug!(
                "Timeout {:?} exceeds the clock range, crawling without a deadline",
                self.settings.timeout
            );
        }

        let ctx = Arc::new(TaskContext {
            parser: Arc::clone(&self.parser),
            clock: Arc::clone(&self.clock),
            ignored_urls: Arc::clone(&self.ignored_urls),
            visited: VisitedLedger::new(),
            counts: WordAggregator::new(),
        });

        tracing::info!(
            "Crawling {} seed(s) with max depth {}, timeout {:?}, {} worker(s)",
            seeds.len(),
            self.settings.max_depth,
            self.settings.timeout,
            self.workers()
        );

        let roots = seeds.iter().map(|seed| {
            CrawlTask::new(
                seed.clone(),
                self.settings.max_depth,
                deadline,
                Arc::clone(&ctx),
            )
            .run()
        });
        self.scheduler.run_to_completion(roots);

        let counts = ctx.counts.snapshot();
        let urls_visited = ctx.visited.len();

        tracing::info!(
            "Crawl finished: {} URL(s) visited, {} distinct word(s)",
            urls_visited,
            counts.len()
        );

        CrawlResult::new(rank(&counts, self.settings.popular_word_count), urls_visited)
    }

    fn max_parallelism(&self) -> usize {
        self.settings.hardware_parallelism
    }
}
