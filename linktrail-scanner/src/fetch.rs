use crate::error::{Result, ScanError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Linktrail/0.1 (https://github.com/trapdoorsec/linktrail)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Retrieves the body of a page.
///
/// Every way a fetch can go wrong collapses into one `Err` for the URL; the
/// crawl engine never retries.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `Fetcher` backed by a pooled reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    pub fn with_options(timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScanError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
                url: url.to_string(),
            });
        }

        debug!("Fetching {}", url);
        let start = Instant::now();
        let response = self.client.get(parsed).send().await?;
        let status = response.status();

        // Error pages are still pages; their links count.
        let body = response.text().await?;
        debug!(
            "Fetched {} ({}, {} bytes in {:?})",
            url,
            status.as_u16(),
            body.len(),
            start.elapsed()
        );

        Ok(body)
    }
}
