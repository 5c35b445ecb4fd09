use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme '{scheme}' in {url}")]
    UnsupportedScheme { scheme: String, url: String },

    #[error("Visited store error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Other error: {0}")]
    Other(String),
}

impl ScanError {
    /// Wraps a backing-store failure. These are the only errors that abort a crawl.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ScanError::Storage(Box::new(err))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, ScanError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
