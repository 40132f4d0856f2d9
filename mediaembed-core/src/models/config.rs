//! Configuration for providers declared outside the code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::provider::{DescriptorFormat, Domains};
use crate::error::CoreError;

/// A provider described entirely by configuration.
///
/// The endpoint receives the resource URL as `url`, plus `maxwidth` and
/// `maxheight` when the caller supplies them. `extra_params` are appended
/// to every request (for example `format=xml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name; also the registry key.
    pub name: String,
    /// Domain fragments, given as a string or a list.
    pub domains: Domains,
    /// oEmbed endpoint.
    pub endpoint: String,
    /// Response format.
    #[serde(default)]
    pub format: DescriptorFormat,
    /// Identifier field; absent means the id is derived from the request URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_tag: Option<String>,
    /// Title field override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_tag: Option<String>,
    /// Thumbnail field override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_tag: Option<String>,
    /// Embed markup node override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_tag: Option<String>,
    /// Query parameters added to every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_params: BTreeMap<String, String>,
    /// URL globs the host must allow for remote images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_url_patterns: Vec<String>,
    /// Credited author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ProviderConfig {
    /// Creates a config with the required fields.
    pub fn new(name: impl Into<String>, domains: Domains, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domains,
            endpoint: endpoint.into(),
            format: DescriptorFormat::default(),
            id_tag: None,
            title_tag: None,
            thumbnail_tag: None,
            embed_tag: None,
            extra_params: BTreeMap::new(),
            image_url_patterns: Vec::new(),
            author: None,
        }
    }

    /// Checks the fields that do not need network or URL parsing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] for a blank name, blank endpoint,
    /// bad domains, or a blank tag override.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidConfig("provider name is blank".to_string()));
        }
        self.domains
            .validate()
            .map_err(|e| CoreError::InvalidConfig(format!("{}: {e}", self.name)))?;
        if self.endpoint.trim().is_empty() {
            return Err(CoreError::InvalidConfig(format!(
                "{}: endpoint is blank",
                self.name
            )));
        }

        let tags = [&self.id_tag, &self.title_tag, &self.thumbnail_tag, &self.embed_tag];
        if tags.iter().any(|t| t.as_deref().is_some_and(|t| t.trim().is_empty())) {
            return Err(CoreError::InvalidConfig(format!(
                "{}: tag names must not be blank",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_deserializes() {
        let config: ProviderConfig = serde_json::from_str(
            r#"{"name": "Vidly", "domains": "vid.ly", "endpoint": "https://vid.ly/oembed"}"#,
        )
        .unwrap();
        assert_eq!(config.format, DescriptorFormat::Xml);
        assert_eq!(config.domains.as_slice(), &["vid.ly".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_with_overrides() {
        let config: ProviderConfig = serde_json::from_str(
            r#"{
                "name": "Clips",
                "domains": ["clips.example.com", "clp.example"],
                "endpoint": "https://clips.example.com/oembed",
                "format": "json",
                "id_tag": "clip_id",
                "extra_params": {"format": "json"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.format, DescriptorFormat::Json);
        assert_eq!(config.id_tag.as_deref(), Some("clip_id"));
        assert_eq!(config.extra_params.get("format").map(String::as_str), Some("json"));
    }

    #[test]
    fn test_invalid_configs() {
        let base = ProviderConfig::new("Vidly", Domains::one("vid.ly"), "https://vid.ly/oembed");

        let mut blank_name = base.clone();
        blank_name.name = " ".to_string();
        assert!(blank_name.validate().is_err());

        let mut no_domains = base.clone();
        no_domains.domains = Domains::Many(Vec::new());
        assert!(no_domains.validate().is_err());

        let mut blank_tag = base;
        blank_tag.id_tag = Some(String::new());
        assert!(blank_tag.validate().is_err());
    }
}
