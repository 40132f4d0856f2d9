//! Vimeo provider.

use mediaembed_core::{CoreError, Domains, EmbedProvider, FetchParams, ProviderAbout};

use super::{AUTHOR, AUTHOR_WEBSITE};
use crate::endpoint::build_api_url;

/// Vimeo oEmbed endpoint (XML flavour).
pub const VIMEO_ENDPOINT: &str = "https://vimeo.com/api/oembed.xml";

/// Vimeo videos.
///
/// Vimeo descriptors carry a `video_id` element, used as the record id.
#[derive(Debug, Clone)]
pub struct VimeoProvider {
    domains: Domains,
}

impl VimeoProvider {
    /// Creates the provider.
    pub fn new() -> Self {
        Self {
            domains: Domains::one("vimeo.com"),
        }
    }
}

impl Default for VimeoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedProvider for VimeoProvider {
    fn name(&self) -> &str {
        "Vimeo"
    }

    fn domains(&self) -> &Domains {
        &self.domains
    }

    fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
        build_api_url(VIMEO_ENDPOINT, params, &[])
    }

    fn about(&self) -> ProviderAbout {
        ProviderAbout::new("Vimeo", "1.2")
            .released("2012-05-30")
            .author(AUTHOR, Some(AUTHOR_WEBSITE), None)
    }

    fn id_tag_name(&self) -> Option<&str> {
        Some("video_id")
    }

    fn image_url_patterns(&self) -> Vec<String> {
        vec!["https://i.vimeocdn.com/*".to_string()]
    }
}
