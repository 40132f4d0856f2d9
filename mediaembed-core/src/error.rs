//! Core error types for `MediaEmbed`.

use thiserror::Error;

/// Core error type for `MediaEmbed` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required fetch parameter was not supplied.
    #[error("Missing parameter: {0}")]
    MissingParam(String),

    /// A fetch parameter was supplied but could not be used.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParam {
        /// Parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Invalid provider or application configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A descriptor document could not be parsed.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Document Error
// ============================================================================

/// Error raised while parsing a descriptor document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The XML reader rejected the input.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Text content could not be decoded.
    #[error("Encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// The JSON parser rejected the input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON descriptor was not an object.
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// The document has no root element.
    #[error("Document has no root element")]
    NoRoot,

    /// An element was still open at end of input.
    #[error("Unclosed element: {0}")]
    Unclosed(String),

    /// An entity reference that is not predefined.
    #[error("Unknown entity: &{0};")]
    UnknownEntity(String),

    /// Content found after the root element.
    #[error("Unexpected content after root element")]
    TrailingContent,
}

// ============================================================================
// Render Error
// ============================================================================

/// Error raised when a stored record cannot be rendered.
///
/// These indicate a malformed stored record rather than a network problem.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The record holds no document.
    #[error("No source to render")]
    SourceMissing,

    /// The stored document could not be parsed.
    #[error("Unparsable stored document: {0}")]
    Unparsable(#[source] DocumentError),

    /// The embed markup node is absent from the document.
    #[error("Missing embed node <{0}>")]
    NodeMissing(String),
}
