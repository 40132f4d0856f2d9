//! Trait definitions for `MediaEmbed`.
//!
//! This module defines the capability set every embed provider satisfies.

use crate::error::CoreError;
use crate::matcher;
use crate::models::{DescriptorFormat, Domains, FetchParams, ProviderAbout};

/// Default name of the title field.
pub const DEFAULT_TITLE_TAG: &str = "title";

/// Default name of the thumbnail field.
pub const DEFAULT_THUMBNAIL_TAG: &str = "thumbnail_url";

/// Default name of the embed markup node.
pub const DEFAULT_EMBED_TAG: &str = "html";

/// A source of embeddable media descriptions.
///
/// Implementors supply static configuration (name, domains, API URL
/// template, credits) and may override field names and matching.
/// Providers are immutable once constructed and shared across callers.
///
/// ## Implementing a Provider
///
/// ```ignore
/// struct ExampleProvider {
///     domains: Domains,
/// }
///
/// impl EmbedProvider for ExampleProvider {
///     fn name(&self) -> &str {
///         "Example"
///     }
///
///     fn domains(&self) -> &Domains {
///         &self.domains
///     }
///
///     fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
///         Ok(format!("https://example.com/oembed?url={}", params.url()?))
///     }
///
///     fn about(&self) -> ProviderAbout {
///         ProviderAbout::new("Example", "1.0")
///     }
/// }
/// ```
pub trait EmbedProvider: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;

    /// Domain fragments this provider answers for. Never empty.
    fn domains(&self) -> &Domains;

    /// Builds the API request URL for the given params.
    ///
    /// # Errors
    ///
    /// Returns an error when the params are missing or malformed.
    fn api_url(&self, params: &FetchParams) -> Result<String, CoreError>;

    /// Credits for this provider.
    fn about(&self) -> ProviderAbout;

    /// Format of the API responses.
    fn format(&self) -> DescriptorFormat {
        DescriptorFormat::Xml
    }

    /// Field holding the resource title.
    fn title_tag_name(&self) -> &str {
        DEFAULT_TITLE_TAG
    }

    /// Field holding the thumbnail URL.
    fn thumbnail_tag_name(&self) -> &str {
        DEFAULT_THUMBNAIL_TAG
    }

    /// Field holding the resource id, or `None` to derive it from the URL.
    fn id_tag_name(&self) -> Option<&str> {
        None
    }

    /// Node holding the player markup.
    fn embed_tag_name(&self) -> &str {
        DEFAULT_EMBED_TAG
    }

    /// Returns true if this provider handles the given resource URL.
    fn is_match(&self, url: &str) -> bool {
        matcher::is_match(self.domains(), url)
    }

    /// URL globs the host must allow for remote image fetching.
    fn image_url_patterns(&self) -> Vec<String> {
        Vec::new()
    }

    /// Field names used by the shared extraction routine.
    fn field_tags(&self) -> FieldTags {
        FieldTags {
            id: self.id_tag_name().map(str::to_string),
            title: self.title_tag_name().to_string(),
            thumbnail: self.thumbnail_tag_name().to_string(),
        }
    }
}

/// Field names a provider's descriptors use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTags {
    /// Identifier field; `None` derives the id from the request URL.
    pub id: Option<String>,
    /// Title field.
    pub title: String,
    /// Thumbnail field.
    pub thumbnail: String,
}

impl Default for FieldTags {
    fn default() -> Self {
        Self {
            id: None,
            title: DEFAULT_TITLE_TAG.to_string(),
            thumbnail: DEFAULT_THUMBNAIL_TAG.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Minimal {
        domains: Domains,
    }

    impl EmbedProvider for Minimal {
        fn name(&self) -> &str {
            "Minimal"
        }

        fn domains(&self) -> &Domains {
            &self.domains
        }

        fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
            Ok(format!("https://api.example.com/oembed?url={}", params.url()?))
        }

        fn about(&self) -> ProviderAbout {
            ProviderAbout::new("Minimal", "0.1")
        }
    }

    #[test]
    fn test_default_field_tags() {
        let provider = Minimal {
            domains: Domains::one("video.example.com"),
        };
        assert_eq!(provider.field_tags(), FieldTags::default());
        assert_eq!(provider.format(), DescriptorFormat::Xml);
        assert_eq!(provider.embed_tag_name(), "html");
        assert!(provider.image_url_patterns().is_empty());
    }

    #[test]
    fn test_default_is_match_uses_domains() {
        let provider = Minimal {
            domains: Domains::one("video.example.com"),
        };
        assert!(provider.is_match("https://video.example.com/v/1"));
        assert!(!provider.is_match("https://other.example.com/v/1"));
        assert!(!provider.is_match(""));
    }
}
