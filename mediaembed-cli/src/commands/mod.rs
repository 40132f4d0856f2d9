//! CLI command implementations.

pub mod config;
pub mod fetch;
pub mod matching;
pub mod providers;
pub mod render;

use anyhow::{Context, Result};
use mediaembed_providers::ProviderRegistry;
use mediaembed_store::{JsonRecordStore, Settings, default_records_path};

/// Builds the registry: built-ins minus disabled ones, then custom providers.
pub fn build_registry(settings: &Settings) -> Result<ProviderRegistry> {
    let registry = ProviderRegistry::with_custom(&settings.custom_providers)
        .context("Invalid custom provider in settings")?;
    Ok(registry.without(&settings.disabled_providers))
}

/// Opens the record store configured in settings.
pub async fn open_records(settings: &Settings) -> Result<JsonRecordStore> {
    let path = settings
        .records_path
        .clone()
        .unwrap_or_else(default_records_path);
    JsonRecordStore::open(path.clone())
        .await
        .with_context(|| format!("Cannot open record store at {}", path.display()))
}
