// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `MediaEmbed` Core
//!
//! Core types, models, and traits for the `MediaEmbed` workspace.
//!
//! This crate provides the foundational abstractions used across all other
//! `MediaEmbed` crates, including:
//!
//! - Domain models (canonical records, placement options, fetch params)
//! - The [`EmbedProvider`] capability trait
//! - Domain matching and handle generation
//! - Descriptor document parsing (XML and JSON)
//! - The [`EmbedRenderer`] that rebuilds embed markup from stored records
//!
//! ## Key Types
//!
//! ### Provider Types
//! - [`EmbedProvider`] - Capability set every provider implements
//! - [`Domains`] - Domain fragments a provider answers for
//! - [`ProviderAbout`] - Credits for a provider
//! - [`DescriptorFormat`] - Wire format of a provider's API
//!
//! ### Record Types
//! - [`CanonicalRecord`] - Normalized, storable result of a fetch
//! - [`FetchParams`] - Caller-supplied parameters for the API URL
//! - [`EmbedOptions`] - Placement options used when rendering
//!
//! ### Rendering
//! - [`DescriptorDocument`] - Parsed descriptor document
//! - [`EmbedRenderer`] - Stored record to markup

pub mod document;
pub mod error;
pub mod handle;
pub mod matcher;
pub mod models;
pub mod render;
pub mod traits;

// Re-export error types
pub use error::{CoreError, DocumentError, RenderError};

// Re-export all model types
pub use models::{
    // Provider types
    DescriptorFormat,
    Domains,
    ProviderAbout,
    ProviderAuthor,
    ProviderConfig,
    // Record types
    CanonicalRecord,
    FetchParams,
    // Placement
    Dimension,
    EmbedOptions,
    Location,
    // Error document
    ERROR_MESSAGE,
    PARAM_MAX_HEIGHT,
    PARAM_MAX_WIDTH,
    PARAM_URL,
    error_document,
};

pub use document::DescriptorDocument;
pub use handle::create_handle;
pub use matcher::is_match;
pub use render::EmbedRenderer;
pub use traits::{EmbedProvider, FieldTags};
