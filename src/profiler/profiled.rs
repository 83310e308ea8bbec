use crate::clock::Clock;
use crate::crawler::{PageParser, PageResult, WebCrawler};
use crate::output::CrawlResult;
use crate::profiler::state::ProfilingState;
use crate::CrawlerError;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Records the time between its creation and its drop
///
/// Dropping on unwind or on future cancellation still records, so failed
/// calls are timed too.
struct CallTimer<'a> {
    method: &'a str,
    clock: &'a dyn Clock,
    state: &'a ProfilingState,
    started: Instant,
}

impl<'a> CallTimer<'a> {
    fn start(method: &'a str, clock: &'a dyn Clock, state: &'a ProfilingState) -> Self {
        Self {
            method,
            clock,
            state,
            started: clock.now(),
        }
    }
}

impl Drop for CallTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.clock.now().saturating_duration_since(self.started);
        self.state.record(self.method, elapsed);
    }
}

/// A [`WebCrawler`] whose `crawl` calls are timed
pub struct ProfiledCrawler<C> {
    inner: C,
    method: String,
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
}

impl<C> ProfiledCrawler<C> {
    pub(crate) fn new(inner: C, clock: Arc<dyn Clock>, state: Arc<ProfilingState>) -> Self {
        Self {
            method: format!("{}#crawl", short_type_name::<C>()),
            inner,
            clock,
            state,
        }
    }

    /// The wrapped crawler
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: WebCrawler> WebCrawler for ProfiledCrawler<C> {
    fn crawl(&self, seeds: &[String]) -> CrawlResult {
        let _timer = CallTimer::start(&self.method, self.clock.as_ref(), &self.state);
        self.inner.crawl(seeds)
    }

    fn max_parallelism(&self) -> usize {
        self.inner.max_parallelism()
    }
}

/// A [`PageParser`] whose `parse` calls are timed
pub struct ProfiledParser<P> {
    inner: P,
    method: String,
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
}

impl<P> ProfiledParser<P> {
    pub(crate) fn new(inner: P, clock: Arc<dyn Clock>, state: Arc<ProfilingState>) -> Self {
        Self {
            method: format!("{}#parse", short_type_name::<P>()),
            inner,
            clock,
            state,
        }
    }

    /// The wrapped parser
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: PageParser> PageParser for ProfiledParser<P> {
    fn parse(&self, url: &str) -> impl Future<Output = Result<PageResult, CrawlerError>> + Send {
        async move {
            let _timer = CallTimer::start(&self.method, self.clock.as_ref(), &self.state);
            self.inner.parse(url).await
        }
    }
}

/// Type name without module path or generic arguments
///
/// `ripple_count::crawler::CrawlEngine<X>` becomes `CrawlEngine`.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
