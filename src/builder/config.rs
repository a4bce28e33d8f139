use serde::Deserialize;

use super::error::BuildError;
use crate::scan::ScanSelection;
use crate::tolerance::MzTolerance;

/// Configuration for the chromatogram builder.
///
/// Retention-time quantities use whatever unit the scans carry (seconds for
/// mzML-derived input).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Minimum retention-time span a contiguous run needs before it is kept
    pub min_time_span: f64,

    /// Minimum apex intensity for a chromatogram to be emitted
    pub min_height: f32,

    /// Peaks below this intensity are ignored entirely (None = keep all)
    pub noise_floor: Option<f32>,

    /// Tolerance for scans that do not carry their own
    pub default_tolerance: Option<MzTolerance>,

    /// Which scans take part in building
    pub scan_selection: ScanSelection,

    /// Log progress every N input scans
    pub progress_interval: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            min_time_span: 0.0,
            min_height: 0.0,
            noise_floor: None,
            default_tolerance: Some(MzTolerance::default()),
            scan_selection: ScanSelection::default(),
            progress_interval: 1000,
        }
    }
}

impl BuilderConfig {
    /// Orbitrap / FT-ICR data: tight tolerance, noisy baseline removed
    pub fn high_resolution() -> Self {
        Self {
            min_time_span: 3.0,
            min_height: 1.0e4,
            noise_floor: Some(1.0e3),
            default_tolerance: Some(MzTolerance::AbsoluteOrPpm {
                absolute: 0.001,
                ppm: 5.0,
            }),
            ..Default::default()
        }
    }

    /// Q-TOF data: wider ppm window, lower intensity scale
    pub fn time_of_flight() -> Self {
        Self {
            min_time_span: 3.0,
            min_height: 5.0e3,
            noise_floor: Some(5.0e2),
            default_tolerance: Some(MzTolerance::AbsoluteOrPpm {
                absolute: 0.002,
                ppm: 15.0,
            }),
            ..Default::default()
        }
    }

    /// Unit-resolution instruments (ion traps, single quads)
    pub fn low_resolution() -> Self {
        Self {
            min_time_span: 6.0,
            min_height: 1.0e3,
            noise_floor: None,
            default_tolerance: Some(MzTolerance::Absolute(0.5)),
            ..Default::default()
        }
    }

    /// Check thresholds and tolerance for usable values
    pub fn validate(&self) -> Result<(), BuildError> {
        if !self.min_time_span.is_finite() || self.min_time_span < 0.0 {
            return Err(BuildError::InvalidConfig(format!(
                "min_time_span must be finite and non-negative, got {}",
                self.min_time_span
            )));
        }
        if !self.min_height.is_finite() || self.min_height < 0.0 {
            return Err(BuildError::InvalidConfig(format!(
                "min_height must be finite and non-negative, got {}",
                self.min_height
            )));
        }
        if let Some(floor) = self.noise_floor {
            if !floor.is_finite() || floor < 0.0 {
                return Err(BuildError::InvalidConfig(format!(
                    "noise_floor must be finite and non-negative, got {floor}"
                )));
            }
        }
        if let Some(tolerance) = &self.default_tolerance {
            tolerance.validate().map_err(BuildError::InvalidConfig)?;
        }
        if self.progress_interval == 0 {
            return Err(BuildError::InvalidConfig(
                "progress_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            BuilderConfig::default(),
            BuilderConfig::high_resolution(),
            BuilderConfig::time_of_flight(),
            BuilderConfig::low_resolution(),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let config = BuilderConfig {
            min_time_span: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BuildError::InvalidConfig(_))));

        let config = BuilderConfig {
            noise_floor: Some(f32::NAN),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BuilderConfig {
            progress_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: BuilderConfig = toml::from_str(
            r#"
            min_time_span = 2.5
            default_tolerance = { ppm = 5.0 }

            [scan_selection]
            ms_level = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.min_time_span, 2.5);
        assert_eq!(config.min_height, 0.0);
        assert_eq!(config.default_tolerance, Some(MzTolerance::Ppm(5.0)));
        assert_eq!(config.scan_selection.ms_level, Some(2));
        assert_eq!(config.progress_interval, 1000);
    }
}
