// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `MediaEmbed` Fetch
//!
//! Descriptor fetching for the `MediaEmbed` workspace.
//!
//! This crate turns a provider plus caller params into a
//! [`CanonicalRecord`](mediaembed_core::CanonicalRecord):
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing and domain allowlist
//! - [`transport::Transport`] - Seam between the fetcher and the network
//!
//! ## Fetching
//!
//! - [`fetcher::DescriptorFetcher`] - Builds the API URL, performs one
//!   fetch, extracts fields, and never fails to produce a record
//! - [`context::FetchContext`] - Transport plus settings
//!
//! ## Example
//!
//! ```ignore
//! use mediaembed_core::FetchParams;
//! use mediaembed_fetch::{DescriptorFetcher, FetchContext};
//!
//! let ctx = FetchContext::new()?;
//! let fetcher = DescriptorFetcher::from_context(&ctx);
//!
//! let params = FetchParams::for_url("https://vimeo.com/76979871");
//! let record = fetcher.fetch(&vimeo, &params).await;
//! assert!(!record.raw_document.is_empty());
//! ```

// Core modules
pub mod context;
pub mod error;
pub mod fetcher;
pub mod host;
pub mod transport;

// Re-export key types at crate root

// Errors
pub use error::{FailureKind, FetchError, HttpError};

// Host APIs
pub use host::http::HttpClient;
pub use transport::Transport;

// Fetching
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use fetcher::{DescriptorFetcher, ExtractedFields, FetchOutcome, extract_fields};
