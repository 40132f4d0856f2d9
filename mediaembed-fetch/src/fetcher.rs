//! Descriptor fetcher.
//!
//! Turns a provider plus caller params into a [`CanonicalRecord`]:
//! build the API URL, perform exactly one fetch, parse the document and
//! extract the id/title/thumbnail fields. Every failure collapses into a
//! failed record carrying the synthetic error document, so callers always
//! get something storable.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use mediaembed_core::{
    CanonicalRecord, DescriptorDocument, EmbedProvider, FetchParams, FieldTags, create_handle,
};
use tracing::{debug, info, instrument, warn};

use crate::context::FetchContext;
use crate::error::{FailureKind, FetchError};
use crate::transport::Transport;

/// Derives a record id from the request URL.
pub type HandleFn = fn(&str) -> String;

// ============================================================================
// Extraction
// ============================================================================

/// Fields pulled out of a descriptor document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Resource identifier.
    pub id: String,
    /// Title, empty if the document has none.
    pub title: String,
    /// Thumbnail URL, empty if the document has none.
    pub thumbnail_url: String,
}

/// Extracts the canonical fields from a parsed document.
///
/// With no declared id field the id is `handle(source_url)`. A declared id
/// field that is absent or blank is an error; title and thumbnail are
/// optional and default to empty.
///
/// # Errors
///
/// Returns [`FetchError::MissingField`] when the declared id field is absent.
pub fn extract_fields(
    doc: &DescriptorDocument,
    tags: &FieldTags,
    source_url: &str,
    handle: HandleFn,
) -> Result<ExtractedFields, FetchError> {
    let id = match &tags.id {
        None => handle(source_url),
        Some(tag) => doc
            .first_element_text(tag)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| FetchError::MissingField(tag.clone()))?,
    };

    let text = |tag: &str| {
        doc.first_element_text(tag)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    Ok(ExtractedFields {
        id,
        title: text(&tags.title),
        thumbnail_url: text(&tags.thumbnail),
    })
}

// ============================================================================
// Fetch Outcome
// ============================================================================

/// The outcome of one fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The record, successful or failed.
    pub record: CanonicalRecord,
    /// Why the fetch failed, if it did.
    pub error: Option<FetchError>,
    /// How long the fetch took.
    pub duration: Duration,
}

impl FetchOutcome {
    /// Returns true if the fetch succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the failure class, if the fetch failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.error.as_ref().map(FetchError::kind)
    }
}

// ============================================================================
// Descriptor Fetcher
// ============================================================================

/// Fetches and normalizes descriptor documents.
///
/// Stateless apart from its transport; safe to share between callers.
/// Concurrent fetches for the same resource are not deduplicated.
#[derive(Clone)]
pub struct DescriptorFetcher {
    transport: Arc<dyn Transport>,
    handle: HandleFn,
}

impl DescriptorFetcher {
    /// Creates a fetcher over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            handle: create_handle,
        }
    }

    /// Creates a fetcher using the context's transport.
    pub fn from_context(ctx: &FetchContext) -> Self {
        Self::new(Arc::clone(&ctx.transport))
    }

    /// Replaces the handle function used for URL-derived ids.
    #[must_use]
    pub fn with_handle(mut self, handle: HandleFn) -> Self {
        self.handle = handle;
        self
    }

    /// Fetches a record. Never fails; see [`CanonicalRecord::failed`].
    pub async fn fetch(&self, provider: &dyn EmbedProvider, params: &FetchParams) -> CanonicalRecord {
        self.execute(provider, params).await.record
    }

    /// Fetches a record and reports why it failed, if it did.
    #[instrument(skip(self, provider, params), fields(provider = %provider.name()))]
    pub async fn execute(&self, provider: &dyn EmbedProvider, params: &FetchParams) -> FetchOutcome {
        let start = Instant::now();

        let source_url = match provider.api_url(params) {
            Ok(url) => url,
            Err(e) => {
                return Self::failed(provider, String::new(), FetchError::from(e), start);
            }
        };

        match self.load(provider, &source_url).await {
            Ok(record) => {
                info!(id = %record.id, "Fetched descriptor");
                FetchOutcome {
                    record,
                    error: None,
                    duration: start.elapsed(),
                }
            }
            Err(e) => Self::failed(provider, source_url, e, start),
        }
    }

    /// Performs the request and builds a successful record.
    async fn load(
        &self,
        provider: &dyn EmbedProvider,
        source_url: &str,
    ) -> Result<CanonicalRecord, FetchError> {
        debug!(url = %source_url, "Requesting descriptor");
        let body = self.transport.fetch_document(source_url).await?;

        let format = provider.format();
        let doc = DescriptorDocument::parse(format, &body)?;
        let fields = extract_fields(&doc, &provider.field_tags(), source_url, self.handle)?;

        Ok(CanonicalRecord {
            provider: provider.name().to_string(),
            source_url: source_url.to_string(),
            raw_document: body,
            format,
            id: fields.id,
            title: fields.title,
            thumbnail_url: fields.thumbnail_url,
            failed: false,
            fetched_at: Utc::now(),
        })
    }

    fn failed(
        provider: &dyn EmbedProvider,
        source_url: String,
        error: FetchError,
        start: Instant,
    ) -> FetchOutcome {
        warn!(kind = %error.kind(), error = %error, url = %source_url, "Descriptor fetch failed");
        FetchOutcome {
            record: CanonicalRecord::failure(provider.name(), source_url),
            error: Some(error),
            duration: start.elapsed(),
        }
    }
}

impl std::fmt::Debug for DescriptorFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorFetcher").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use async_trait::async_trait;
    use mediaembed_core::{
        CoreError, DescriptorFormat, Domains, ERROR_MESSAGE, ProviderAbout, error_document,
    };
    use std::sync::Mutex;

    // ========================================================================
    // Test doubles
    // ========================================================================

    enum Reply {
        Body(&'static str),
        Status(u16),
        Unreachable,
    }

    struct StubTransport {
        reply: Reply,
        requests: Mutex<Vec<String>>,
    }

    impl StubTransport {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn fetch_document(&self, url: &str) -> Result<String, HttpError> {
            self.requests.lock().unwrap().push(url.to_string());
            match self.reply {
                Reply::Body(body) => Ok(body.to_string()),
                Reply::Status(code) => Err(HttpError::Status(code)),
                Reply::Unreachable => Err(HttpError::InvalidUrl("connection refused".to_string())),
            }
        }
    }

    struct TestProvider {
        domains: Domains,
        id_tag: Option<&'static str>,
        format: DescriptorFormat,
    }

    impl TestProvider {
        fn new() -> Self {
            Self {
                domains: Domains::one("video.example.com"),
                id_tag: None,
                format: DescriptorFormat::Xml,
            }
        }
    }

    impl EmbedProvider for TestProvider {
        fn name(&self) -> &str {
            "Example"
        }

        fn domains(&self) -> &Domains {
            &self.domains
        }

        fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
            Ok(format!("https://api.example.com/oembed?url={}", params.url()?))
        }

        fn about(&self) -> ProviderAbout {
            ProviderAbout::new("Example", "1.0")
        }

        fn format(&self) -> DescriptorFormat {
            self.format
        }

        fn id_tag_name(&self) -> Option<&str> {
            self.id_tag
        }
    }

    const DOC: &str = "<oembed><title>Big Buck Bunny</title><thumbnail_url>https://img.example.com/1.jpg</thumbnail_url><html>&lt;iframe/&gt;</html></oembed>";

    fn params() -> FetchParams {
        FetchParams::for_url("https://video.example.com/v/1")
    }

    // ========================================================================
    // Success
    // ========================================================================

    #[tokio::test]
    async fn test_fetch_derives_id_from_url() {
        let transport = StubTransport::new(Reply::Body(DOC));
        let fetcher = DescriptorFetcher::new(transport.clone());

        let record = fetcher.fetch(&TestProvider::new(), &params()).await;

        assert!(!record.failed);
        assert_eq!(record.source_url, "https://api.example.com/oembed?url=https://video.example.com/v/1");
        assert_eq!(record.id, create_handle(&record.source_url));
        assert_eq!(record.title, "Big Buck Bunny");
        assert_eq!(record.thumbnail_url, "https://img.example.com/1.jpg");
        assert_eq!(record.raw_document, DOC);
        assert_eq!(record.provider, "Example");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_id_is_stable() {
        let fetcher = DescriptorFetcher::new(StubTransport::new(Reply::Body(DOC)));
        let first = fetcher.fetch(&TestProvider::new(), &params()).await;
        let second = fetcher.fetch(&TestProvider::new(), &params()).await;
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_fetch_reads_declared_id() {
        let doc = "<oembed><video_id> 42 </video_id><title>t</title></oembed>";
        let fetcher = DescriptorFetcher::new(StubTransport::new(Reply::Body(doc)));
        let provider = TestProvider {
            id_tag: Some("video_id"),
            ..TestProvider::new()
        };

        let record = fetcher.fetch(&provider, &params()).await;
        assert!(!record.failed);
        assert_eq!(record.id, "42");
        assert!(record.thumbnail_url.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_json_provider() {
        let doc = r#"{"title":"Song","thumbnail_url":"https://img/1.png","html":"<iframe></iframe>"}"#;
        let fetcher = DescriptorFetcher::new(StubTransport::new(Reply::Body(doc)));
        let provider = TestProvider {
            format: DescriptorFormat::Json,
            ..TestProvider::new()
        };

        let record = fetcher.fetch(&provider, &params()).await;
        assert!(!record.failed);
        assert_eq!(record.format, DescriptorFormat::Json);
        assert_eq!(record.title, "Song");
    }

    #[tokio::test]
    async fn test_custom_handle_fn() {
        fn fixed(_: &str) -> String {
            "fixed".to_string()
        }
        let fetcher = DescriptorFetcher::new(StubTransport::new(Reply::Body(DOC))).with_handle(fixed);
        let record = fetcher.fetch(&TestProvider::new(), &params()).await;
        assert_eq!(record.id, "fixed");
    }

    // ========================================================================
    // Failures
    // ========================================================================

    async fn assert_failed(reply: Reply, provider: &TestProvider, params: &FetchParams, kind: FailureKind) {
        let fetcher = DescriptorFetcher::new(StubTransport::new(reply));
        let outcome = fetcher.execute(provider, params).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.failure_kind(), Some(kind));
        assert!(outcome.record.failed);
        assert_eq!(outcome.record.raw_document, error_document(ERROR_MESSAGE));
        assert!(outcome.record.id.is_empty());
        assert!(outcome.record.title.is_empty());
        assert!(outcome.record.thumbnail_url.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_failed_record() {
        assert_failed(Reply::Unreachable, &TestProvider::new(), &params(), FailureKind::Transport).await;
    }

    #[tokio::test]
    async fn test_non_success_status_yields_failed_record() {
        assert_failed(Reply::Status(404), &TestProvider::new(), &params(), FailureKind::Transport).await;
    }

    #[tokio::test]
    async fn test_malformed_document_yields_failed_record() {
        assert_failed(Reply::Body("<html><body>oops"), &TestProvider::new(), &params(), FailureKind::Parse).await;
        assert_failed(Reply::Body(""), &TestProvider::new(), &params(), FailureKind::Parse).await;
    }

    #[tokio::test]
    async fn test_missing_declared_id_is_failure() {
        let provider = TestProvider {
            id_tag: Some("video_id"),
            ..TestProvider::new()
        };
        assert_failed(Reply::Body(DOC), &provider, &params(), FailureKind::MissingField).await;
    }

    #[tokio::test]
    async fn test_bad_params_never_reach_transport() {
        let transport = StubTransport::new(Reply::Body(DOC));
        let fetcher = DescriptorFetcher::new(transport.clone());

        let outcome = fetcher.execute(&TestProvider::new(), &FetchParams::new()).await;

        assert_eq!(outcome.failure_kind(), Some(FailureKind::Transport));
        assert!(outcome.record.source_url.is_empty());
        assert!(!outcome.record.raw_document.is_empty());
        assert!(transport.requests().is_empty());
    }

    // ========================================================================
    // Extraction
    // ========================================================================

    #[test]
    fn test_extract_fields_blank_id_is_missing() {
        let doc = DescriptorDocument::parse(DescriptorFormat::Xml, "<oembed><id>  </id></oembed>").unwrap();
        let tags = FieldTags {
            id: Some("id".to_string()),
            ..FieldTags::default()
        };
        let err = extract_fields(&doc, &tags, "u", create_handle).unwrap_err();
        assert!(matches!(err, FetchError::MissingField(tag) if tag == "id"));
    }

    #[test]
    fn test_extract_fields_custom_tags() {
        let doc = DescriptorDocument::parse(
            DescriptorFormat::Xml,
            "<oembed><name>Custom</name><thumb>t.jpg</thumb></oembed>",
        )
        .unwrap();
        let tags = FieldTags {
            id: None,
            title: "name".to_string(),
            thumbnail: "thumb".to_string(),
        };
        let fields = extract_fields(&doc, &tags, "https://a.b/c", create_handle).unwrap();
        assert_eq!(fields.title, "Custom");
        assert_eq!(fields.thumbnail_url, "t.jpg");
        assert_eq!(fields.id, "https-ab-c");
    }
}
