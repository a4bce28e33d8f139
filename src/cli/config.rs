//! TOML configuration file support for power users.
//!
//! Instead of passing many CLI flags, users can specify settings in a config file:
//!
//! ```toml
//! # mzxic.toml
//! [builder]
//! min_time_span = 4.0
//! min_height = 5000.0
//! noise_floor = 250.0
//! tolerance = { absolute_or_ppm = { absolute = 0.002, ppm = 8.0 } }
//! ms_level = 1
//! ```
//!
//! Values set here override the chosen preset; command-line flags override both.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mzxic::builder::BuilderConfig;
use mzxic::tolerance::MzTolerance;

/// Root configuration structure for mzxic.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Builder-specific settings.
    #[serde(default)]
    pub builder: BuilderOverrides,
}

/// Optional overrides for [`BuilderConfig`] fields.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BuilderOverrides {
    /// Minimum retention-time span of a kept run.
    pub min_time_span: Option<f64>,

    /// Minimum chromatogram apex intensity.
    pub min_height: Option<f32>,

    /// Peaks below this intensity are ignored.
    pub noise_floor: Option<f32>,

    /// Default m/z tolerance.
    pub tolerance: Option<MzTolerance>,

    /// Only scans of this MS level take part.
    pub ms_level: Option<u8>,

    /// Log progress every N scans.
    pub progress_interval: Option<usize>,
}

impl BuilderOverrides {
    /// Apply every set field to `config`.
    pub fn apply(&self, config: &mut BuilderConfig) {
        if let Some(span) = self.min_time_span {
            config.min_time_span = span;
        }
        if let Some(height) = self.min_height {
            config.min_height = height;
        }
        if let Some(floor) = self.noise_floor {
            config.noise_floor = Some(floor);
        }
        if let Some(tolerance) = self.tolerance {
            config.default_tolerance = Some(tolerance);
        }
        if let Some(level) = self.ms_level {
            config.scan_selection.ms_level = Some(level);
        }
        if let Some(interval) = self.progress_interval {
            config.progress_interval = interval;
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
