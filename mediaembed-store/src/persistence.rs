//! JSON files on disk.
//!
//! Settings live under the platform config directory and fetched records
//! under the cache directory. Writes go to a sibling temp file that is then
//! renamed over the target, so the previous file survives any failed write.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::StoreError;

const APP_DIR: &str = "mediaembed";

/// Returns the configuration directory, e.g. `~/.config/mediaembed`.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

/// Returns the default record file path, e.g. `~/.cache/mediaembed/records.json`.
pub fn default_records_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("records.json")
}

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read and
/// [`StoreError::Serialization`] if it is not valid JSON for `T`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Serializes `data` and replaces the file at `path` in one rename.
///
/// Missing parent directories are created owner-only and the file is
/// written `0600` on Unix. On error the file at `path` is untouched.
///
/// # Errors
///
/// Returns an error if serialization, directory creation, the write or the
/// rename fails.
pub async fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    data: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(data)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_private_dir(parent).await?;
    }

    let temp_path = path.with_extension("json.tmp");
    let written = match write_private_file(&temp_path, &json).await {
        Ok(()) => tokio::fs::rename(&temp_path, path)
            .await
            .map_err(StoreError::from),
        Err(e) => Err(e),
    };

    if written.is_err() {
        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            debug!(path = %temp_path.display(), error = %e, "No temp file to clean up");
        }
    } else {
        debug!(path = %path.display(), bytes = json.len(), "Wrote JSON file");
    }
    written
}

async fn create_private_dir(dir: &Path) -> Result<(), StoreError> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);
    builder.create(dir).await?;
    Ok(())
}

async fn write_private_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}
