use crate::clock::Clock;
use crate::crawler::page::PageParser;
use crate::crawler::scheduler::{fork_join, CrawlFuture};
use crate::state::{VisitedLedger, WordAggregator};
use crate::url::PatternSet;
use futures::FutureExt;
use std::sync::Arc;
use std::time::Instant;

/// State shared by every task of one crawl invocation
pub(crate) struct TaskContext<P> {
    pub(crate) parser: Arc<P>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ignored_urls: Arc<PatternSet>,
    pub(crate) visited: VisitedLedger,
    pub(crate) counts: WordAggregator,
}

/// Why a task stopped before fetching its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Skip {
    DepthExhausted,
    DeadlinePassed,
    Ignored,
    AlreadyClaimed,
}

/// Processes one URL at one remaining depth
///
/// A task is finished only once every task it spawned has finished. A
/// `None` deadline never passes.
pub(crate) struct CrawlTask<P> {
    url: String,
    remaining_depth: u32,
    deadline: Option<Instant>,
    ctx: Arc<TaskContext<P>>,
}

impl<P: PageParser> CrawlTask<P> {
    pub(crate) fn new(
        url: String,
        remaining_depth: u32,
        deadline: Option<Instant>,
        ctx: Arc<TaskContext<P>>,
    ) -> Self {
        Self {
            url,
            remaining_depth,
            deadline,
            ctx,
        }
    }

    fn child(&self, url: String) -> Self {
        Self::new(
            url,
            self.remaining_depth.saturating_sub(1),
            self.deadline,
            Arc::clone(&self.ctx),
        )
    }

    /// Decides whether this task may fetch its URL, in order: depth,
    /// deadline, ignore list, then the atomic claim
    fn admit(&self) -> Result<(), Skip> {
        if self.remaining_depth == 0 {
            return Err(Skip::DepthExhausted);
        }
        if let Some(deadline) = self.deadline {
            if self.ctx.clock.now() >= deadline {
                return Err(Skip::DeadlinePassed);
            }
        }
        if self.ctx.ignored_urls.matches(&self.url) {
            return Err(Skip::Ignored);
        }
        if !self.ctx.visited.claim(&self.url) {
            return Err(Skip::AlreadyClaimed);
        }
        Ok(())
    }

    /// Runs this task and, transitively, all of its children
    pub(crate) fn run(self) -> CrawlFuture {
        async move {
            if let Err(reason) = self.admit() {
                tracing::trace!("Skipping {} ({:?})", self.url, reason);
                return;
            }

            tracing::debug!("Visiting {} (depth budget {})", self.url, self.remaining_depth);

            // A failed page keeps its claim but contributes nothing
            let page = match self.ctx.parser.parse(&self.url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", self.url, e);
                    return;
                }
            };

            self.ctx.counts.merge(&page.word_counts);

            let children: Vec<CrawlFuture> = page
                .links
                .into_iter()
                .map(|link| self.child(link).run())
                .collect();

            fork_join(children).await;
        }
        .boxed()
    }
}
