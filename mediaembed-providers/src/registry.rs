//! Provider registry.
//!
//! The registry is an ordered, caller-constructed collection of providers.
//! Selection scans it in order and the first provider whose domains match
//! the URL wins.

use mediaembed_core::{CoreError, EmbedProvider, ProviderConfig};
use tracing::{debug, warn};

use crate::builtin::{
    DailymotionProvider, FlickrProvider, SoundCloudProvider, VimeoProvider, YouTubeProvider,
};
use crate::generic::GenericProvider;

// ============================================================================
// Selection
// ============================================================================

/// Returns the first provider in `providers` that matches `url`.
pub fn select_provider<'a>(
    providers: &'a [Box<dyn EmbedProvider>],
    url: &str,
) -> Option<&'a dyn EmbedProvider> {
    providers.iter().map(|p| &**p).find(|p| p.is_match(url))
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Ordered collection of providers.
///
/// Providers are immutable once registered, so a registry can be shared
/// across threads behind an `Arc`.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn EmbedProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in providers.
    ///
    /// Order: Vimeo, YouTube, Flickr, Dailymotion, SoundCloud.
    pub fn builtin() -> Self {
        Self {
            providers: vec![
                Box::new(VimeoProvider::new()),
                Box::new(YouTubeProvider::new()),
                Box::new(FlickrProvider::new()),
                Box::new(DailymotionProvider::new()),
                Box::new(SoundCloudProvider::new()),
            ],
        }
    }

    /// Creates the built-in registry with configured providers appended.
    ///
    /// # Errors
    ///
    /// Returns an error if a config is invalid or reuses a provider name.
    pub fn with_custom(configs: &[ProviderConfig]) -> Result<Self, CoreError> {
        let mut registry = Self::builtin();
        for config in configs {
            registry.register(Box::new(GenericProvider::from_config(config.clone())?))?;
        }
        Ok(registry)
    }

    /// Appends a provider.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the provider has no domains or
    /// its name is already registered (case-insensitive).
    pub fn register(&mut self, provider: Box<dyn EmbedProvider>) -> Result<(), CoreError> {
        provider
            .domains()
            .validate()
            .map_err(|e| CoreError::InvalidConfig(format!("{}: {e}", provider.name())))?;
        if self.get(provider.name()).is_some() {
            return Err(CoreError::InvalidConfig(format!(
                "duplicate provider name: {}",
                provider.name()
            )));
        }
        debug!(name = %provider.name(), domains = %provider.domains(), "Registered provider");
        self.providers.push(provider);
        Ok(())
    }

    /// Removes providers by name (case-insensitive). Unknown names are logged.
    #[must_use]
    pub fn without(mut self, names: &[String]) -> Self {
        for name in names {
            let before = self.providers.len();
            self.providers.retain(|p| !p.name().eq_ignore_ascii_case(name));
            if self.providers.len() == before {
                warn!(name = %name, "Cannot disable unknown provider");
            }
        }
        self
    }

    /// Returns the first provider matching the URL.
    pub fn select(&self, url: &str) -> Option<&dyn EmbedProvider> {
        let selected = select_provider(&self.providers, url);
        debug!(url = %url, provider = ?selected.map(|p| p.name()), "Selected provider");
        selected
    }

    /// Looks up a provider by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&dyn EmbedProvider> {
        self.iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Returns provider names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|p| p.name()).collect()
    }

    /// Returns every provider's image URL patterns, without duplicates.
    pub fn image_url_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = Vec::new();
        for pattern in self.iter().flat_map(|p| p.image_url_patterns()) {
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
        patterns
    }

    /// Iterates over providers in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn EmbedProvider> {
        self.providers.iter().map(|p| &**p)
    }

    /// Returns the providers as a slice.
    pub fn as_slice(&self) -> &[Box<dyn EmbedProvider>] {
        &self.providers
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
