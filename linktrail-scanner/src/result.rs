use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

/// A page that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub url: String,
    pub error: String,
}

impl FetchFailure {
    pub fn new(url: &str, error: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            error: error.to_string(),
        }
    }
}

/// Outcome of one crawl run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub seed: String,
    /// Pages fetched (or attempted), in visit order.
    pub visited: Vec<String>,
    /// URLs newly recorded in the visited store during this run.
    pub discovered: usize,
    pub failures: Vec<FetchFailure>,
    pub duration: Duration,
}

impl CrawlSummary {
    pub fn new(seed: String) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.visited.len() - self.failures.len()
    }
}

/// Write-only side channel for fetch failures. The engine never reads it back.
pub trait FailureSink {
    fn fetch_failed(&mut self, failure: &FetchFailure);
}

/// Emits each failure as an `ERROR` event on the `linktrail::fetch` target,
/// which ends up in the log file.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFailures;

impl FailureSink for LogFailures {
    fn fetch_failed(&mut self, failure: &FetchFailure) {
        error!(
            target: "linktrail::fetch",
            url = %failure.url,
            "Fetch failed for URL: {} with error: {}",
            failure.url,
            failure.error
        );
    }
}

impl FailureSink for Vec<FetchFailure> {
    fn fetch_failed(&mut self, failure: &FetchFailure) {
        self.push(failure.clone());
    }
}
