//! HTTP retrieval of the Image of the Day page and the image itself.
//!
//! Two blocking GETs per run, no retries. The [`PageFetcher`] trait is the
//! seam the workflow is tested through; [`HttpFetcher`] is the real client.
//!
//! Timeouts are whatever `reqwest`'s blocking client ships with. No custom
//! headers are sent.

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Source of page HTML and raw image bytes.
pub trait PageFetcher {
    /// GET `url` and return the body as text.
    fn fetch_page(&self, url: &str) -> Result<String, FetchError>;

    /// GET `url` and return the raw body.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`PageFetcher`] backed by `reqwest`'s blocking client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.get(url)?.text().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let body = self.get(url)?.bytes().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!(url, bytes = body.len(), "downloaded");
        Ok(body.to_vec())
    }
}
