use crate::error::Result;
use crate::extract::extract_links;
use crate::fetch::Fetcher;
use crate::frontier::Frontier;
use crate::normalize::normalize_seed;
use crate::result::{CrawlSummary, FailureSink, FetchFailure, LogFailures};
use crate::visited::{Discoveries, VisitedSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Called with the running visit count and the URL about to be fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Breadth-first crawl engine.
///
/// One page at a time: pop, fetch, extract, record what is new, queue it.
/// Fetch failures are handed to the failure sink and the crawl moves on; a
/// visited-store error ends the crawl.
pub struct Crawler<F, S, L = LogFailures> {
    fetcher: F,
    store: S,
    failures: L,
    frontier: Frontier,
    progress_callback: Option<ProgressCallback>,
}

impl<F: Fetcher, S: VisitedSet> Crawler<F, S, LogFailures> {
    pub fn new(fetcher: F, store: S) -> Self {
        Self {
            fetcher,
            store,
            failures: LogFailures,
            frontier: Frontier::new(),
            progress_callback: None,
        }
    }
}

impl<F: Fetcher, S: VisitedSet, L: FailureSink> Crawler<F, S, L> {
    pub fn with_failure_sink<N: FailureSink>(self, failures: N) -> Crawler<F, S, N> {
        Crawler {
            fetcher: self.fetcher,
            store: self.store,
            failures,
            frontier: self.frontier,
            progress_callback: self.progress_callback,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawls everything reachable from `seed_url` until the frontier runs dry.
    ///
    /// There is no depth or page limit; on a large enough link graph this
    /// does not return.
    pub async fn crawl(&mut self, seed_url: &str) -> Result<CrawlSummary> {
        let seed = normalize_seed(seed_url);
        info!("Starting crawl of {}", seed);

        let start = Instant::now();
        let mut summary = CrawlSummary::new(seed.clone());

        self.frontier.clear();
        self.frontier.push(seed);

        while let Some(current) = self.frontier.pop() {
            if !self.frontier.mark_visited(&current) {
                debug!("Skipping already visited {}", current);
                continue;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(self.frontier.visited_count(), current.clone());
            }
            summary.visited.push(current.clone());

            let body = match self.fetcher.fetch(&current).await {
                Ok(body) => body,
                Err(e) => {
                    let failure = FetchFailure::new(&current, &e);
                    self.failures.fetch_failed(&failure);
                    summary.failures.push(failure);
                    continue;
                }
            };

            let links = extract_links(&body, &current);
            for discovered in Discoveries::new(links, &current, &mut self.store) {
                let url = discovered?;
                summary.discovered += 1;
                if self.frontier.push(url.clone()) {
                    debug!("Queued {}", url);
                }
            }
        }

        summary.duration = start.elapsed();
        info!(
            "Crawl complete. Visited {} pages, discovered {} URLs, {} failures",
            summary.visited.len(),
            summary.discovered,
            summary.failures.len()
        );
        Ok(summary)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn failures(&self) -> &L {
        &self.failures
    }

    pub fn into_parts(self) -> (F, S, L) {
        (self.fetcher, self.store, self.failures)
    }
}
