//! Transport seam between the fetcher and the network.

use async_trait::async_trait;

use crate::error::HttpError;
use crate::host::http::HttpClient;

/// Retrieves a descriptor document body.
///
/// One call is one network attempt; implementations must not retry.
/// The production implementation is [`HttpClient`]; tests substitute their
/// own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the document at `url` and returns its body.
    async fn fetch_document(&self, url: &str) -> Result<String, HttpError>;
}

#[async_trait]
impl Transport for HttpClient {
    async fn fetch_document(&self, url: &str) -> Result<String, HttpError> {
        self.get_text(url).await
    }
}
