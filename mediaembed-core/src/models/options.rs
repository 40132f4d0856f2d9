//! Placement options for rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Where the embed is displayed in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Main content area.
    #[default]
    Main,
    /// Constrained preview area.
    Sidebar,
}

impl Location {
    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Sidebar => "sidebar",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" => Ok(Self::Main),
            "sidebar" => Ok(Self::Sidebar),
            other => Err(CoreError::InvalidParam {
                name: "location".to_string(),
                reason: format!("expected main or sidebar, got {other}"),
            }),
        }
    }
}

/// A size axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Horizontal size.
    Width,
    /// Vertical size.
    Height,
}

/// Placement options supplied when rendering a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedOptions {
    /// Display location.
    #[serde(default)]
    pub location: Location,
    /// Target width.
    pub width: u32,
    /// Target height.
    pub height: u32,
    /// Width override for the sidebar.
    #[serde(default)]
    pub width_side: Option<u32>,
    /// Height override for the sidebar.
    #[serde(default)]
    pub height_side: Option<u32>,
}

impl EmbedOptions {
    /// Options for the main area.
    pub fn main(width: u32, height: u32) -> Self {
        Self {
            location: Location::Main,
            width,
            height,
            width_side: None,
            height_side: None,
        }
    }

    /// Options for the sidebar, without side overrides.
    pub fn sidebar(width: u32, height: u32) -> Self {
        Self {
            location: Location::Sidebar,
            ..Self::main(width, height)
        }
    }

    /// Sets the sidebar width override.
    #[must_use]
    pub fn with_width_side(mut self, width: u32) -> Self {
        self.width_side = Some(width);
        self
    }

    /// Sets the sidebar height override.
    #[must_use]
    pub fn with_height_side(mut self, height: u32) -> Self {
        self.height_side = Some(height);
        self
    }

    /// Returns the size to use for one axis.
    ///
    /// The side override only applies in the sidebar, and only when set.
    pub fn effective(&self, dimension: Dimension) -> u32 {
        let (base, side) = match dimension {
            Dimension::Width => (self.width, self.width_side),
            Dimension::Height => (self.height, self.height_side),
        };
        match (self.location, side) {
            (Location::Sidebar, Some(side)) => side,
            _ => base,
        }
    }

    /// Effective width.
    pub fn effective_width(&self) -> u32 {
        self.effective(Dimension::Width)
    }

    /// Effective height.
    pub fn effective_height(&self) -> u32 {
        self.effective(Dimension::Height)
    }
}
