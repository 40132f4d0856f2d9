//! Canonical records and fetch parameters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::provider::DescriptorFormat;
use crate::error::CoreError;

/// Message wrapped in the synthetic document of a failed fetch.
pub const ERROR_MESSAGE: &str = "Could not load XML from oEmbed remote service";

/// Parameter holding the resource URL.
pub const PARAM_URL: &str = "url";

/// Parameter holding the maximum embed width.
pub const PARAM_MAX_WIDTH: &str = "maxwidth";

/// Parameter holding the maximum embed height.
pub const PARAM_MAX_HEIGHT: &str = "maxheight";

/// Wraps a message in the synthetic error document.
pub fn error_document(message: &str) -> String {
    format!("<error>{message}</error>")
}

// ============================================================================
// Fetch Params
// ============================================================================

/// Caller-supplied parameters consumed by a provider's URL builder.
///
/// There is no fixed schema; each provider reads what it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchParams(BTreeMap<String, String>);

impl FetchParams {
    /// Creates empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates params holding only the resource URL.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self::new().with(PARAM_URL, url)
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns a parameter value, failing when it is missing or blank.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingParam`] if the key is absent or blank.
    pub fn require(&self, key: &str) -> Result<&str, CoreError> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(CoreError::MissingParam(key.to_string())),
        }
    }

    /// Returns the resource URL.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingParam`] if no URL was supplied.
    pub fn url(&self) -> Result<&str, CoreError> {
        self.require(PARAM_URL)
    }

    /// Returns a numeric parameter if present.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidParam`] if the value is not a positive integer.
    pub fn dimension(&self, key: &str) -> Result<Option<u32>, CoreError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .map(Some)
            .ok_or_else(|| CoreError::InvalidParam {
                name: key.to_string(),
                reason: format!("expected a positive integer, got {raw:?}"),
            })
    }

    /// Iterates over all parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// Canonical Record
// ============================================================================

/// Normalized, storable result of querying a provider for one resource.
///
/// `raw_document` is never empty: failed fetches store a synthetic error
/// document so that storage can keep the column non-nullable.
/// `id`, `title` and `thumbnail_url` are only meaningful when `failed` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Name of the provider that produced the record.
    pub provider: String,
    /// The exact API URL that was requested.
    pub source_url: String,
    /// Fetched document, or the synthetic error document.
    pub raw_document: String,
    /// Format of `raw_document`.
    #[serde(default)]
    pub format: DescriptorFormat,
    /// Resource identifier.
    #[serde(default)]
    pub id: String,
    /// Resource title.
    #[serde(default)]
    pub title: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail_url: String,
    /// Whether the fetch or parse failed.
    pub failed: bool,
    /// When the fetch happened.
    pub fetched_at: DateTime<Utc>,
}

impl CanonicalRecord {
    /// Creates a failed record carrying the fixed error document.
    pub fn failure(provider: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            source_url: source_url.into(),
            raw_document: error_document(ERROR_MESSAGE),
            format: DescriptorFormat::Xml,
            id: String::new(),
            title: String::new(),
            thumbnail_url: String::new(),
            failed: true,
            fetched_at: Utc::now(),
        }
    }

    /// Returns true if the record holds a usable descriptor.
    pub fn is_success(&self) -> bool {
        !self.failed
    }

    /// Returns the thumbnail URL, if one was extracted.
    pub fn thumbnail(&self) -> Option<&str> {
        if self.failed || self.thumbnail_url.is_empty() {
            None
        } else {
            Some(&self.thumbnail_url)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_record_has_document() {
        let record = CanonicalRecord::failure("Vimeo", "https://vimeo.com/api/oembed.xml");
        assert!(record.failed);
        assert!(!record.raw_document.is_empty());
        assert!(record.raw_document.starts_with("<error>"));
        assert_eq!(record.format, DescriptorFormat::Xml);
        assert!(record.thumbnail().is_none());
    }

    #[test]
    fn test_params_require() {
        let params = FetchParams::for_url("https://vimeo.com/1").with("maxwidth", " ");
        assert_eq!(params.url().unwrap(), "https://vimeo.com/1");
        assert!(params.require("maxwidth").is_err());
        assert!(params.require("missing").is_err());
    }

    #[test]
    fn test_params_dimension() {
        let params = FetchParams::new()
            .with(PARAM_MAX_WIDTH, "640")
            .with(PARAM_MAX_HEIGHT, "wide");
        assert_eq!(params.dimension(PARAM_MAX_WIDTH).unwrap(), Some(640));
        assert!(params.dimension(PARAM_MAX_HEIGHT).is_err());
        assert_eq!(params.dimension("absent").unwrap(), None);
    }

    #[test]
    fn test_record_deserializes_without_optional_fields() {
        let json = r#"{
            "provider": "Vimeo",
            "source_url": "https://vimeo.com/api/oembed.xml?url=x",
            "raw_document": "<oembed/>",
            "failed": false,
            "fetched_at": "2024-01-15T10:00:00Z"
        }"#;
        let record: CanonicalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.format, DescriptorFormat::Xml);
        assert!(record.title.is_empty());
    }
}
