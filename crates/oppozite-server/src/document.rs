//! Fetches the base HTML document that gets rewritten.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

/// Largest base document accepted; anything bigger is a fetch failure.
pub const MAX_DOCUMENT_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("request carries no usable host header")]
    MissingHost,

    /// Network, TLS or timeout failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("document at {url} exceeds {limit} bytes")]
    TooLarge { limit: usize, url: String },
}

/// HTTP client for the deployment's own `index.html`. Single attempt, bounded
/// by the configured timeout.
pub struct DocumentFetcher {
    client: Client,
    max_bytes: usize,
}

impl DocumentFetcher {
    /// # Errors
    ///
    /// Returns [`DocumentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, DocumentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_bytes: MAX_DOCUMENT_BYTES,
        })
    }

    /// Overrides the body size cap.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Returns the body of `url` as text.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::Http`] on network failure or timeout.
    /// - [`DocumentError::UnexpectedStatus`] on any non-2xx status.
    /// - [`DocumentError::TooLarge`] when the body exceeds the size cap.
    pub async fn fetch(&self, url: &str) -> Result<String, DocumentError> {
        let mut response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let too_large = || DocumentError::TooLarge {
            limit: self.max_bytes,
            url: url.to_owned(),
        };
        let declared =
            usize::try_from(response.content_length().unwrap_or(0)).unwrap_or(usize::MAX);
        if declared > self.max_bytes {
            return Err(too_large());
        }

        let mut body = Vec::with_capacity(declared);
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
