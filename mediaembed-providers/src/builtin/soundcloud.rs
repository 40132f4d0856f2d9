//! SoundCloud provider.

use mediaembed_core::{
    CoreError, DescriptorFormat, Domains, EmbedProvider, FetchParams, ProviderAbout,
};

use super::{AUTHOR, AUTHOR_WEBSITE};
use crate::endpoint::build_api_url;

/// SoundCloud oEmbed endpoint.
pub const SOUNDCLOUD_ENDPOINT: &str = "https://soundcloud.com/oembed";

/// SoundCloud tracks and sets. Uses the JSON flavour of the API.
#[derive(Debug, Clone)]
pub struct SoundCloudProvider {
    domains: Domains,
}

impl SoundCloudProvider {
    /// Creates the provider.
    pub fn new() -> Self {
        Self {
            domains: Domains::from_static(&["soundcloud.com", "snd.sc"]),
        }
    }
}

impl Default for SoundCloudProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedProvider for SoundCloudProvider {
    fn name(&self) -> &str {
        "SoundCloud"
    }

    fn domains(&self) -> &Domains {
        &self.domains
    }

    fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
        build_api_url(SOUNDCLOUD_ENDPOINT, params, &[("format", "json")])
    }

    fn about(&self) -> ProviderAbout {
        ProviderAbout::new("SoundCloud", "1.0")
            .released("2014-01-20")
            .author(AUTHOR, Some(AUTHOR_WEBSITE), None)
    }

    fn format(&self) -> DescriptorFormat {
        DescriptorFormat::Json
    }

    fn image_url_patterns(&self) -> Vec<String> {
        vec!["https://i1.sndcdn.com/*".to_string()]
    }
}
