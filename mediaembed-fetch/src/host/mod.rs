//! Host APIs used by the fetcher.
//!
//! - [`http`] - HTTP client with tracing and domain allowlist

pub mod http;
