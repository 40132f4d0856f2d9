//! Fetch context providing access to the transport.
//!
//! The context bundles the transport used for descriptor requests with the
//! settings it was built from.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::HttpError;
use crate::host::http::{DEFAULT_TIMEOUT_SECS, HttpClient};
use crate::transport::Transport;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Transport timeout for one descriptor request.
    pub timeout: Duration,
    /// Restrict requests to these domains (and their subdomains).
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            allowed_domains: None,
        }
    }
}

impl FetchSettings {
    /// Creates settings with custom timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates settings restricted to the given domains.
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Builds an HTTP client from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Request`] if the client cannot be constructed.
    pub fn build_http_client(&self) -> Result<HttpClient, HttpError> {
        let client = HttpClient::try_with_timeout(self.timeout)?;
        Ok(match &self.allowed_domains {
            Some(domains) => client.allow_only(domains.clone()),
            None => client,
        })
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to the fetcher.
pub struct FetchContext {
    /// Transport for descriptor requests.
    pub transport: Arc<dyn Transport>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a new fetch context with the HTTP transport.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_settings(FetchSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Result<Self, HttpError> {
        debug!(timeout = ?settings.timeout, "Creating fetch context");
        Ok(Self {
            transport: Arc::new(settings.build_http_client()?),
            settings,
        })
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the transport timeout.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
pub struct FetchContextBuilder {
    transport: Option<Arc<dyn Transport>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            transport: None,
            settings: FetchSettings::default(),
        }
    }

    /// Sets the transport implementation.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the fetch settings.
    #[must_use]
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Restricts requests to the given domains.
    #[must_use]
    pub fn allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.settings.allowed_domains = Some(domains);
        self
    }

    /// Builds the fetch context.
    ///
    /// An HTTP client is only constructed when no transport was supplied.
    pub fn build(self) -> Result<FetchContext, HttpError> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(self.settings.build_http_client()?),
        };
        Ok(FetchContext {
            transport,
            settings: self.settings,
        })
    }
}

impl Default for FetchContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = FetchContext::builder()
            .timeout(Duration::from_secs(5))
            .allowed_domains(vec!["vimeo.com".to_string()])
            .build()
            .unwrap();

        assert_eq!(ctx.timeout(), Duration::from_secs(5));
        assert_eq!(
            ctx.settings.allowed_domains.as_deref(),
            Some(&["vimeo.com".to_string()][..])
        );
    }

    #[test]
    fn test_default_context() {
        let ctx = FetchContext::new().unwrap();
        assert_eq!(ctx.timeout(), Duration::from_secs(30));
        assert!(ctx.settings.allowed_domains.is_none());
    }

    #[test]
    fn test_settings_build_client_without_panicking() {
        let settings = FetchSettings::default()
            .with_timeout(Duration::from_millis(1))
            .with_allowed_domains(vec!["youtube.com".to_string()]);
        assert!(settings.build_http_client().is_ok());
    }
}
