//! User settings store.
//!
//! Loads, validates, edits and saves the settings file.

use mediaembed_core::{EmbedOptions, Location, ProviderConfig};
use mediaembed_fetch::FetchSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, read_json, write_json_atomic};

// ============================================================================
// Settings Types
// ============================================================================

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Default embed sizes.
    pub embed: EmbedSettings,

    /// HTTP transport settings.
    pub http: HttpSettings,

    /// Log level.
    pub log_level: LogLevel,

    /// Built-in providers to leave out of the registry.
    pub disabled_providers: Vec<String>,

    /// Providers declared in configuration, appended after the built-ins.
    pub custom_providers: Vec<ProviderConfig>,

    /// Record file; the platform cache dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_path: Option<PathBuf>,
}

impl Settings {
    /// Checks values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] on zero sizes, a zero timeout, or an
    /// invalid custom provider.
    pub fn validate(&self) -> Result<(), StoreError> {
        let sizes = [
            Some(self.embed.width),
            Some(self.embed.height),
            self.embed.width_side,
            self.embed.height_side,
        ];
        if sizes.contains(&Some(0)) {
            return Err(StoreError::Config("embed sizes must be positive".to_string()));
        }
        if self.http.timeout_secs == 0 {
            return Err(StoreError::Config("http.timeout_secs must be positive".to_string()));
        }
        for provider in &self.custom_providers {
            provider
                .validate()
                .map_err(|e| StoreError::Config(e.to_string()))?;
        }
        Ok(())
    }
}

/// Default embed sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedSettings {
    /// Main-area width.
    pub width: u32,
    /// Main-area height.
    pub height: u32,
    /// Sidebar width; falls back to `width`.
    pub width_side: Option<u32>,
    /// Sidebar height; falls back to `height`.
    pub height_side: Option<u32>,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            width_side: Some(300),
            height_side: Some(169),
        }
    }
}

impl EmbedSettings {
    /// Builds placement options for the given location.
    pub fn options(&self, location: Location) -> EmbedOptions {
        EmbedOptions {
            location,
            width: self.width,
            height: self.height,
            width_side: self.width_side,
            height_side: self.height_side,
        }
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Restrict requests to these domains and their subdomains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            allowed_domains: None,
        }
    }
}

impl HttpSettings {
    /// Converts to fetch settings.
    pub fn fetch_settings(&self) -> FetchSettings {
        let settings = FetchSettings::default().with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.allowed_domains {
            Some(domains) => settings.with_allowed_domains(domains.clone()),
            None => settings,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Settings bound to the file they are saved to.
#[derive(Debug)]
pub struct SettingsStore {
    settings: RwLock<Settings>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store holding defaults.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
            path,
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Returns error if the settings file exists but is invalid.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing file yields defaults. A file that cannot be parsed is
    /// logged and replaced by defaults; one that parses but fails validation
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the loaded settings are invalid.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            read_json(&path).await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load settings, using defaults");
                Settings::default()
            })
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };
        settings.validate()?;

        Ok(Self::with_settings(path, settings))
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Edits the in-memory settings. Call [`save`](Self::save) to persist.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if the settings are invalid or cannot be written.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        settings.validate()?;
        write_json_atomic(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Adds or replaces a custom provider (matched by name, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the provider config is invalid.
    pub async fn upsert_custom_provider(&self, config: ProviderConfig) -> Result<(), StoreError> {
        config
            .validate()
            .map_err(|e| StoreError::Config(e.to_string()))?;
        self.update(|s| {
            s.custom_providers
                .retain(|p| !p.name.eq_ignore_ascii_case(&config.name));
            s.custom_providers.push(config);
        })
        .await;
        Ok(())
    }

    /// Disables or re-enables a provider by name.
    pub async fn set_provider_disabled(&self, name: &str, disabled: bool) {
        self.update(|s| {
            s.disabled_providers.retain(|n| !n.eq_ignore_ascii_case(name));
            if disabled {
                s.disabled_providers.push(name.to_string());
            }
        })
        .await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mediaembed_core::{Dimension, Domains};

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.embed.width, 640);
        assert_eq!(settings.http.timeout_secs, 30);
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert!(settings.custom_providers.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_settings_file() {
        let settings: Settings =
            serde_json::from_str(r#"{"embed": {"width": 800}, "log_level": "debug"}"#).unwrap();
        assert_eq!(settings.embed.width, 800);
        assert_eq!(settings.embed.height, 360);
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_embed_options_from_settings() {
        let embed = EmbedSettings {
            width: 640,
            height: 360,
            width_side: Some(250),
            height_side: None,
        };
        let side = embed.options(Location::Sidebar);
        assert_eq!(side.effective(Dimension::Width), 250);
        assert_eq!(side.effective(Dimension::Height), 360);

        let main = embed.options(Location::Main);
        assert_eq!(main.effective(Dimension::Width), 640);
    }

    #[test]
    fn test_fetch_settings_conversion() {
        let http = HttpSettings {
            timeout_secs: 5,
            allowed_domains: Some(vec!["vimeo.com".to_string()]),
        };
        let fetch = http.fetch_settings();
        assert_eq!(fetch.timeout, Duration::from_secs(5));
        assert!(fetch.allowed_domains.is_some());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut settings = Settings::default();
        settings.embed.width_side = Some(0);
        assert!(matches!(settings.validate(), Err(StoreError::Config(_))));

        let mut settings = Settings::default();
        settings.http.timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[tokio::test]
    async fn test_update_is_visible_before_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone());

        store.update(|s| s.log_level = LogLevel::Trace).await;

        assert_eq!(store.get().await.log_level, LogLevel::Trace);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_upsert_custom_provider() {
        let store = SettingsStore::new(PathBuf::from("/tmp/mediaembed_test_settings.json"));
        let config = ProviderConfig::new("Vidly", Domains::one("vid.ly"), "https://vid.ly/oembed");

        store.upsert_custom_provider(config.clone()).await.unwrap();
        store
            .upsert_custom_provider(ProviderConfig::new(
                "vidly",
                Domains::one("vid.ly"),
                "https://vid.ly/oembed2",
            ))
            .await
            .unwrap();

        let providers = store.get().await.custom_providers;
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].endpoint, "https://vid.ly/oembed2");

        let mut bad = config;
        bad.domains = Domains::Many(Vec::new());
        assert!(store.upsert_custom_provider(bad).await.is_err());
    }

    #[tokio::test]
    async fn test_toggle_disabled_provider() {
        let store = SettingsStore::new(PathBuf::from("/tmp/mediaembed_test_settings.json"));

        store.set_provider_disabled("Flickr", true).await;
        store.set_provider_disabled("flickr", true).await;
        assert_eq!(store.get().await.disabled_providers, vec!["flickr".to_string()]);

        store.set_provider_disabled("FLICKR", false).await;
        assert!(store.get().await.disabled_providers.is_empty());
    }
}
