//! Dailymotion provider.

use mediaembed_core::{CoreError, Domains, EmbedProvider, FetchParams, ProviderAbout};

use super::{AUTHOR, AUTHOR_WEBSITE};
use crate::endpoint::build_api_url;

/// Dailymotion oEmbed endpoint.
pub const DAILYMOTION_ENDPOINT: &str = "https://www.dailymotion.com/services/oembed";

/// Dailymotion videos, including `dai.ly` short links.
#[derive(Debug, Clone)]
pub struct DailymotionProvider {
    domains: Domains,
}

impl DailymotionProvider {
    /// Creates the provider.
    pub fn new() -> Self {
        Self {
            domains: Domains::from_static(&["dailymotion.com", "dai.ly"]),
        }
    }
}

impl Default for DailymotionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedProvider for DailymotionProvider {
    fn name(&self) -> &str {
        "Dailymotion"
    }

    fn domains(&self) -> &Domains {
        &self.domains
    }

    fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
        build_api_url(DAILYMOTION_ENDPOINT, params, &[("format", "xml")])
    }

    fn about(&self) -> ProviderAbout {
        ProviderAbout::new("Dailymotion", "1.0")
            .released("2012-06-04")
            .author(AUTHOR, Some(AUTHOR_WEBSITE), None)
    }
}
