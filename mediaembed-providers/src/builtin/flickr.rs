//! Flickr provider.

use mediaembed_core::{CoreError, Domains, EmbedProvider, FetchParams, ProviderAbout};

use super::{AUTHOR, AUTHOR_WEBSITE};
use crate::endpoint::build_api_url;

/// Flickr oEmbed endpoint.
pub const FLICKR_ENDPOINT: &str = "https://www.flickr.com/services/oembed/";

/// Flickr photos.
///
/// Flickr serves thumbnails from its static farms, which the host has to
/// allow for remote image processing.
#[derive(Debug, Clone)]
pub struct FlickrProvider {
    domains: Domains,
}

impl FlickrProvider {
    /// Creates the provider.
    pub fn new() -> Self {
        Self {
            domains: Domains::from_static(&["flickr.com", "flic.kr"]),
        }
    }
}

impl Default for FlickrProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedProvider for FlickrProvider {
    fn name(&self) -> &str {
        "Flickr"
    }

    fn domains(&self) -> &Domains {
        &self.domains
    }

    fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
        build_api_url(FLICKR_ENDPOINT, params, &[("format", "xml")])
    }

    fn about(&self) -> ProviderAbout {
        ProviderAbout::new("Flickr", "1.1")
            .released("2012-08-14")
            .author(AUTHOR, Some(AUTHOR_WEBSITE), None)
    }

    fn image_url_patterns(&self) -> Vec<String> {
        vec![
            "http://farm*.static.flickr.com/*".to_string(),
            "https://farm*.staticflickr.com/*".to_string(),
            "https://live.staticflickr.com/*".to_string(),
        ]
    }
}
