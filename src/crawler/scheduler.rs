//! Bounded worker pool with structured fork/join
//!
//! This module handles:
//! - Sizing the worker pool once, at engine construction
//! - Running root crawl tasks to full completion
//! - Fanning out child tasks and joining exactly those children
//!
//! Tasks are futures on a work-stealing multi-threaded runtime, so a parent
//! waiting on its children parks only itself, never a worker thread. Deep
//! fan-out therefore needs no more threads than the pool size.

use crate::CrawlerError;
use futures::future::BoxFuture;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinSet;

/// A unit of crawl work ready to be scheduled
pub type CrawlFuture = BoxFuture<'static, ()>;

/// Worker pool executing crawl tasks
///
/// Each engine owns its own scheduler; nothing here is process-global.
pub struct Scheduler {
    runtime: Runtime,
    workers: usize,
}

impl Scheduler {
    /// Creates a pool of `min(requested, hardware_parallelism)` workers
    ///
    /// # Returns
    ///
    /// * `Ok(Scheduler)` - Pool started
    /// * `Err(CrawlerError::Scheduler)` - Worker threads could not be created
    pub fn new(requested: usize, hardware_parallelism: usize) -> Result<Self, CrawlerError> {
        let workers = pool_size(requested, hardware_parallelism);

        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name("ripple-worker")
            .enable_all()
            .build()
            .map_err(CrawlerError::Scheduler)?;

        tracing::debug!("Started crawl worker pool with {} workers", workers);

        Ok(Self { runtime, workers })
    }

    /// Number of worker threads in the pool
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs every root task and blocks until all of them, and everything
    /// they spawned, have finished
    ///
    /// Must be called from synchronous code, not from inside an async task.
    pub fn run_to_completion<I>(&self, roots: I)
    where
        I: IntoIterator<Item = CrawlFuture>,
    {
        self.runtime.block_on(fork_join(roots));
    }
}

/// Effective pool size: the request capped by the hardware, never below one
pub fn pool_size(requested: usize, hardware_parallelism: usize) -> usize {
    requested.min(hardware_parallelism).max(1)
}

/// Spawns each task onto the current pool and waits for exactly those tasks
///
/// A panic in any task is resumed in the caller once it is observed.
pub async fn fork_join<I>(tasks: I)
where
    I: IntoIterator<Item = CrawlFuture>,
{
    let mut set = JoinSet::new();
    for task in tasks {
        set.spawn(task);
    }

    while let Some(joined) = set.join_next().await {
        if let Err(e) = joined {
            if e.is_panic() {
                std::panic::resume_unwind(e.into_panic());
            }
            tracing::warn!("Crawl task was cancelled: {}", e);
        }
    }
}
