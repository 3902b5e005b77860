//! Render configuration.
//!
//! Settings for the final serialization step, loadable from TOML:
//!
//! ```toml
//! segments = 64
//! header = "whitebox enclosure"
//! ```
//!
//! Missing keys fall back to [`RenderConfig::default`].

use crate::BuildError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Circular resolution used when a config does not set one.
pub const DEFAULT_SEGMENTS: u32 = 48;

/// Settings passed to the OpenSCAD serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Segment count for circular primitives (`$fn`).
    pub segments: u32,
    /// Optional comment written at the top of the output.
    pub header: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            header: None,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, BuildError> {
        let config: RenderConfig = toml::from_str(s)?;
        config.validate()
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let path = path.as_ref();
        log::debug!("loading render config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Replace the segment count, validating it.
    pub fn with_segments(mut self, segments: u32) -> Result<Self, BuildError> {
        self.segments = segments;
        self.validate()
    }

    fn validate(self) -> Result<Self, BuildError> {
        if self.segments < 3 {
            return Err(BuildError::InvalidParameter(format!(
                "segments must be at least 3, got {}",
                self.segments
            )));
        }
        Ok(self)
    }
}
