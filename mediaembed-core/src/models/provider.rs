//! Provider-related types.
//!
//! This module contains the static configuration pieces of a provider:
//! - [`Domains`] - Domain fragments the provider answers for
//! - [`DescriptorFormat`] - Format of the provider's API responses
//! - [`ProviderAbout`] - Credits shown to the host

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Domains
// ============================================================================

/// Domain fragments a provider is responsible for.
///
/// Configuration may give a single string or a list; both are read back
/// through [`Domains::as_slice`] as an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Domains {
    /// A single domain fragment.
    One(String),
    /// Several domain fragments, matched in order.
    Many(Vec<String>),
}

impl Domains {
    /// Creates a single-fragment domain set.
    pub fn one(domain: impl Into<String>) -> Self {
        Self::One(domain.into())
    }

    /// Creates a domain set from static fragments.
    pub fn from_static(domains: &[&str]) -> Self {
        Self::Many(domains.iter().map(|d| (*d).to_string()).collect())
    }

    /// Creates a validated domain set.
    ///
    /// # Errors
    ///
    /// Returns an error if no fragment is given or a fragment is blank.
    pub fn many<I, S>(domains: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domains = Self::Many(domains.into_iter().map(Into::into).collect());
        domains.validate()?;
        Ok(domains)
    }

    /// Returns the fragments as an ordered slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(domain) => std::slice::from_ref(domain),
            Self::Many(domains) => domains,
        }
    }

    /// Returns the number of fragments.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Checks that the set is non-empty and holds no blank fragment.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] when the check fails.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::InvalidConfig(
                "provider must declare at least one domain".to_string(),
            ));
        }
        if self.as_slice().iter().any(|d| d.trim().is_empty()) {
            return Err(CoreError::InvalidConfig(
                "provider domains must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Domains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_slice().join(", "))
    }
}

// ============================================================================
// Descriptor Format
// ============================================================================

/// Format of the descriptor documents a provider returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorFormat {
    /// XML document with an `<oembed>` root.
    #[default]
    Xml,
    /// JSON object.
    Json,
}

impl DescriptorFormat {
    /// Returns the value used in `format=` query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for DescriptorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DescriptorFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown descriptor format: {other}"
            ))),
        }
    }
}

// ============================================================================
// Credits
// ============================================================================

/// Credits for a provider implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAbout {
    /// Display name.
    pub name: String,
    /// Implementation version.
    pub version: String,
    /// Release date (ISO 8601).
    pub release_date: String,
    /// Who wrote it.
    pub author: ProviderAuthor,
}

/// Author details in [`ProviderAbout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderAuthor {
    /// Author name.
    pub name: String,
    /// Author website.
    pub website: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

impl ProviderAbout {
    /// Creates credits with the given name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            release_date: String::new(),
            author: ProviderAuthor::default(),
        }
    }

    /// Sets the release date.
    #[must_use]
    pub fn released(mut self, date: impl Into<String>) -> Self {
        self.release_date = date.into();
        self
    }

    /// Sets the author.
    #[must_use]
    pub fn author(mut self, name: impl Into<String>, website: Option<&str>, email: Option<&str>) -> Self {
        self.author = ProviderAuthor {
            name: name.into(),
            website: website.map(str::to_string),
            email: email.map(str::to_string),
        };
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
