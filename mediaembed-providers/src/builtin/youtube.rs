//! YouTube provider.

use mediaembed_core::{CoreError, Domains, EmbedProvider, FetchParams, ProviderAbout};

use super::{AUTHOR, AUTHOR_WEBSITE};
use crate::endpoint::build_api_url;

/// YouTube oEmbed endpoint.
pub const YOUTUBE_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// YouTube videos, including `youtu.be` short links.
///
/// YouTube descriptors have no id element; ids come from the request URL.
#[derive(Debug, Clone)]
pub struct YouTubeProvider {
    domains: Domains,
}

impl YouTubeProvider {
    /// Creates the provider.
    pub fn new() -> Self {
        Self {
            domains: Domains::from_static(&["youtube.com", "youtu.be"]),
        }
    }
}

impl Default for YouTubeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedProvider for YouTubeProvider {
    fn name(&self) -> &str {
        "YouTube"
    }

    fn domains(&self) -> &Domains {
        &self.domains
    }

    fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
        build_api_url(YOUTUBE_ENDPOINT, params, &[("format", "xml")])
    }

    fn about(&self) -> ProviderAbout {
        ProviderAbout::new("YouTube", "1.3")
            .released("2013-02-11")
            .author(AUTHOR, Some(AUTHOR_WEBSITE), None)
    }

    fn image_url_patterns(&self) -> Vec<String> {
        vec!["https://i.ytimg.com/*".to_string()]
    }
}
