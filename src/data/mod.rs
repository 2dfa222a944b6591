//! CSV retrieval from the attendance log host
//!
//! The downloaded text is handed to the model verbatim; nothing here parses
//! or validates the CSV contents.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors raised while locating or downloading a CSV file
#[derive(Debug, Error)]
pub enum FetchError {
    /// File name is empty or looks like a path; files live flat on the host
    #[error("invalid file name: {0}")]
    InvalidFilename(String),

    #[error("invalid CSV URL: {0}")]
    InvalidUrl(String),

    #[error("CSV host returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("network error fetching CSV: {0}")]
    Network(#[from] reqwest::Error),
}

/// Source of CSV documents, keyed by file name
///
/// The server talks to this trait so tests can swap in an in-memory source.
#[async_trait]
pub trait CsvSource: Send + Sync {
    async fn fetch(&self, filename: &str) -> Result<String, FetchError>;
}

/// Fetches CSV files from the configured HTTP host
pub struct RemoteCsvSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteCsvSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolve a file name against the configured host
    fn file_url(&self, filename: &str) -> Result<Url, FetchError> {
        let name = filename.trim();
        if name.is_empty() {
            return Err(FetchError::InvalidFilename("(empty)".to_string()));
        }
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(FetchError::InvalidFilename(name.to_string()));
        }

        let base =
            Url::parse(&self.base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        base.join(name)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl CsvSource for RemoteCsvSource {
    async fn fetch(&self, filename: &str) -> Result<String, FetchError> {
        let url = self.file_url(filename)?;
        tracing::debug!(%url, "Fetching CSV");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        Ok(response.text().await?)
    }
}
