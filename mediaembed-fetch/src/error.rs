//! Fetch error types.

use std::fmt;

use mediaembed_core::{CoreError, DocumentError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Failure Kind
// ============================================================================

/// Class of a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network unreachable, non-success response, or unusable params.
    Transport,
    /// The response is not a document of the expected format.
    Parse,
    /// A field the provider declares as required is absent.
    MissingField,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::Parse => "parse",
            Self::MissingField => "missing field",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
///
/// [`DescriptorFetcher::fetch`](crate::DescriptorFetcher::fetch) folds
/// these into a failed record; they surface only through
/// [`FetchOutcome`](crate::FetchOutcome) for logging and diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider could not build an API URL from the params.
    #[error("Invalid params: {0}")]
    InvalidParams(#[from] CoreError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The response could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] DocumentError),

    /// A declared identifier field is absent.
    #[error("Missing field: {0}")]
    MissingField(String),
}

impl FetchError {
    /// Returns the failure class.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidParams(_) | Self::Http(_) => FailureKind::Transport,
            Self::Parse(_) => FailureKind::Parse,
            Self::MissingField(_) => FailureKind::MissingField,
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success status.
    #[error("Unexpected status {0}")]
    Status(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let params = FetchError::from(CoreError::MissingParam("url".to_string()));
        assert_eq!(params.kind(), FailureKind::Transport);

        let http = FetchError::from(HttpError::Status(404));
        assert_eq!(http.kind(), FailureKind::Transport);

        let parse = FetchError::from(DocumentError::NoRoot);
        assert_eq!(parse.kind(), FailureKind::Parse);

        let missing = FetchError::MissingField("video_id".to_string());
        assert_eq!(missing.kind(), FailureKind::MissingField);
        assert_eq!(missing.to_string(), "Missing field: video_id");
    }
}
