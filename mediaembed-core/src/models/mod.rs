//! Domain models for `MediaEmbed`.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider configuration types (Domains, About, Format)
//! - [`record`] - Canonical records and fetch parameters
//! - [`options`] - Placement options for rendering
//! - [`config`] - Providers declared in configuration

mod config;
mod options;
mod provider;
mod record;

// Re-export everything at the models level
pub use config::ProviderConfig;
pub use options::{Dimension, EmbedOptions, Location};
pub use provider::{DescriptorFormat, Domains, ProviderAbout, ProviderAuthor};
pub use record::{
    CanonicalRecord, FetchParams, ERROR_MESSAGE, PARAM_MAX_HEIGHT, PARAM_MAX_WIDTH, PARAM_URL,
    error_document,
};
