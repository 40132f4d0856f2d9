//! Providers declared in configuration.

use mediaembed_core::{
    CoreError, DescriptorFormat, Domains, EmbedProvider, FetchParams, ProviderAbout,
    ProviderConfig,
    traits::{DEFAULT_EMBED_TAG, DEFAULT_THUMBNAIL_TAG, DEFAULT_TITLE_TAG},
};
use tracing::debug;

use crate::endpoint::{build_api_url, validate_endpoint};

/// Version reported in the credits of configured providers.
const GENERIC_VERSION: &str = "1.0";

/// An oEmbed endpoint described by a [`ProviderConfig`].
#[derive(Debug, Clone)]
pub struct GenericProvider {
    config: ProviderConfig,
}

impl GenericProvider {
    /// Validates a config and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the config is incomplete or the
    /// endpoint is not an http(s) URL.
    pub fn from_config(config: ProviderConfig) -> Result<Self, CoreError> {
        config.validate()?;
        validate_endpoint(&config.endpoint)?;
        debug!(name = %config.name, endpoint = %config.endpoint, "Configured provider");
        Ok(Self { config })
    }

    /// Returns the underlying config.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

impl EmbedProvider for GenericProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn domains(&self) -> &Domains {
        &self.config.domains
    }

    fn api_url(&self, params: &FetchParams) -> Result<String, CoreError> {
        let extra: Vec<(&str, &str)> = self
            .config
            .extra_params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        build_api_url(&self.config.endpoint, params, &extra)
    }

    fn about(&self) -> ProviderAbout {
        let about = ProviderAbout::new(self.config.name.clone(), GENERIC_VERSION);
        match &self.config.author {
            Some(author) => about.author(author.clone(), None, None),
            None => about,
        }
    }

    fn format(&self) -> DescriptorFormat {
        self.config.format
    }

    fn title_tag_name(&self) -> &str {
        self.config.title_tag.as_deref().unwrap_or(DEFAULT_TITLE_TAG)
    }

    fn thumbnail_tag_name(&self) -> &str {
        self.config
            .thumbnail_tag
            .as_deref()
            .unwrap_or(DEFAULT_THUMBNAIL_TAG)
    }

    fn id_tag_name(&self) -> Option<&str> {
        self.config.id_tag.as_deref()
    }

    fn embed_tag_name(&self) -> &str {
        self.config.embed_tag.as_deref().unwrap_or(DEFAULT_EMBED_TAG)
    }

    fn image_url_patterns(&self) -> Vec<String> {
        self.config.image_url_patterns.clone()
    }
}
