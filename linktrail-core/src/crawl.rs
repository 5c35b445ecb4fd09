use crate::data::{VisitedStore, fresh_store_path, store_filename};
use crate::error::Result;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use linktrail_scanner::fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use linktrail_scanner::{CrawlSummary, Crawler, Fetcher, HttpFetcher, normalize_seed};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub seed: String,
    /// Directory the visited store file is created in
    pub output_dir: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub show_progress_bars: bool,
}

impl CrawlOptions {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            output_dir: PathBuf::from("."),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            show_progress_bars: false,
        }
    }
}

/// Everything a finished crawl leaves behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    pub summary: CrawlSummary,
    pub store_path: PathBuf,
    /// Contents of the visited store, in discovery order
    pub stored_urls: Vec<String>,
}

/// Crawls from `options.seed` over HTTP, recording discoveries in a fresh
/// store file under `options.output_dir`.
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlReport> {
    let fetcher = HttpFetcher::with_options(options.timeout_secs, &options.user_agent)?;
    crawl_with(fetcher, options).await
}

/// Like [`execute_crawl`] but with the caller's fetcher.
pub async fn crawl_with<F: Fetcher>(fetcher: F, options: CrawlOptions) -> Result<CrawlReport> {
    let seed = normalize_seed(&options.seed);

    std::fs::create_dir_all(&options.output_dir)?;
    let store_path = fresh_store_path(&options.output_dir, &store_filename(&seed, Local::now()));
    let store = VisitedStore::open(&store_path)?;
    info!("Recording discovered URLs in {}", store_path.display());

    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let mut crawler = Crawler::new(fetcher, store);
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |count: usize, url: String| {
            pb_clone.set_message(format!("Crawling... {} pages visited, now {}", count, url));
        }));
    }

    let outcome = crawler.crawl(&seed).await;

    if let Some(ref pb) = progress_bar {
        match outcome {
            Ok(ref summary) => pb.finish_with_message(format!(
                "Crawl complete! {} pages visited",
                summary.visited.len()
            )),
            Err(_) => pb.abandon_with_message("Crawl aborted"),
        }
    }

    let (_, store, _) = crawler.into_parts();
    let summary = outcome?;

    let stored_urls = store.urls();
    store.close()?;
    let stored_urls = stored_urls?;

    Ok(CrawlReport {
        summary,
        store_path,
        stored_urls,
    })
}
