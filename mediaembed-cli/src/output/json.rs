//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use mediaembed_core::{CanonicalRecord, DescriptorFormat, EmbedProvider};
use mediaembed_fetch::{FailureKind, FetchOutcome};
use mediaembed_providers::ProviderRegistry;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a provider.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOutput {
    pub name: String,
    pub domains: Vec<String>,
    pub format: DescriptorFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_field: Option<String>,
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image_url_patterns: Vec<String>,
}

impl ProviderOutput {
    pub fn from_provider(provider: &dyn EmbedProvider) -> Self {
        let about = provider.about();
        Self {
            name: provider.name().to_string(),
            domains: provider.domains().as_slice().to_vec(),
            format: provider.format(),
            id_field: provider.id_tag_name().map(str::to_string),
            version: about.version,
            author: about.author.name,
            image_url_patterns: provider.image_url_patterns(),
        }
    }
}

/// JSON output for a fetched record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutput<'a> {
    pub provider: &'a str,
    pub source_url: &'a str,
    pub failed: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub id: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub thumbnail_url: &'a str,
    pub format: DescriptorFormat,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
    pub duration_ms: u64,
}

/// Why a fetch failed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub kind: FailureKind,
    pub message: String,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the provider list.
    pub fn format_providers(&self, registry: &ProviderRegistry) -> Result<String> {
        let outputs: Vec<ProviderOutput> =
            registry.iter().map(ProviderOutput::from_provider).collect();
        self.format(&outputs)
    }

    /// Formats a fetch outcome.
    pub fn format_outcome(&self, outcome: &FetchOutcome) -> Result<String> {
        self.format(&record_output(&outcome.record, outcome))
    }
}

fn record_output<'a>(record: &'a CanonicalRecord, outcome: &FetchOutcome) -> RecordOutput<'a> {
    RecordOutput {
        provider: &record.provider,
        source_url: &record.source_url,
        failed: record.failed,
        id: &record.id,
        title: &record.title,
        thumbnail_url: &record.thumbnail_url,
        format: record.format,
        fetched_at: record.fetched_at,
        error: outcome.error.as_ref().map(|e| ErrorOutput {
            kind: e.kind(),
            message: e.to_string(),
        }),
        duration_ms: u64::try_from(outcome.duration.as_millis()).unwrap_or(u64::MAX),
    }
}
