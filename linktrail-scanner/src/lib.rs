pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod normalize;
pub mod result;
pub mod visited;

pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use extract::extract_links;
pub use fetch::{Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use normalize::{normalize, normalize_seed};
pub use result::{CrawlSummary, FailureSink, FetchFailure, LogFailures};
pub use visited::{Discoveries, VisitedSet};
