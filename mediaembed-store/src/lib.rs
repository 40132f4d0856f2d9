// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `MediaEmbed` Store
//!
//! Storage and settings for the `MediaEmbed` workspace.
//!
//! This crate provides:
//!
//! - **RecordStore**: Persistence for canonical records, keyed by resource URL
//! - **SettingsStore**: User settings with validation and persistence
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use mediaembed_store::{JsonRecordStore, RecordStore, SettingsStore};
//!
//! let settings = SettingsStore::load_default().await?;
//! let records = JsonRecordStore::open_default().await?;
//!
//! records.put("https://vimeo.com/76979871", record).await?;
//! let stored = records.get("https://vimeo.com/76979871").await?;
//! ```

pub mod error;
pub mod persistence;
pub mod record_store;
pub mod settings_store;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_records_path, default_settings_path, read_json,
    write_json_atomic,
};
pub use record_store::{JsonRecordStore, MemoryRecordStore, RecordStore};
pub use settings_store::{EmbedSettings, HttpSettings, LogLevel, Settings, SettingsStore};
