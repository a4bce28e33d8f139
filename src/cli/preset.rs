//! Instrument presets for common acquisition setups.
//!
//! Presets bundle tolerance, noise floor and emission thresholds so users only
//! need to know what kind of instrument produced the data.

use std::fmt;
use std::str::FromStr;

use mzxic::builder::BuilderConfig;

/// Instrument presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    /// Library defaults.
    ///
    /// - Tolerance: 0.002 Th or 10 ppm, whichever is wider
    /// - No noise floor, no span or height threshold
    #[default]
    Default,

    /// Orbitrap / FT-ICR.
    ///
    /// - Tolerance: 0.001 Th or 5 ppm
    /// - Noise floor 1e3, min height 1e4, min span 3 s
    HighResolution,

    /// Q-TOF.
    ///
    /// - Tolerance: 0.002 Th or 15 ppm
    /// - Noise floor 5e2, min height 5e3, min span 3 s
    TimeOfFlight,

    /// Unit resolution (ion trap, single quadrupole).
    ///
    /// - Tolerance: 0.5 Th
    /// - Min height 1e3, min span 6 s
    LowResolution,
}

impl Preset {
    /// Builder configuration for this preset.
    pub fn builder_config(&self) -> BuilderConfig {
        match self {
            Preset::Default => BuilderConfig::default(),
            Preset::HighResolution => BuilderConfig::high_resolution(),
            Preset::TimeOfFlight => BuilderConfig::time_of_flight(),
            Preset::LowResolution => BuilderConfig::low_resolution(),
        }
    }

    /// Returns all available preset names.
    pub fn variants() -> &'static [&'static str] {
        &["default", "high-resolution", "time-of-flight", "low-resolution"]
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Default => write!(f, "default"),
            Preset::HighResolution => write!(f, "high-resolution"),
            Preset::TimeOfFlight => write!(f, "time-of-flight"),
            Preset::LowResolution => write!(f, "low-resolution"),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Preset::Default),
            "high-resolution" | "highres" | "orbitrap" => Ok(Preset::HighResolution),
            "time-of-flight" | "tof" => Ok(Preset::TimeOfFlight),
            "low-resolution" | "lowres" => Ok(Preset::LowResolution),
            _ => Err(format!(
                "Unknown preset '{}'. Valid options: {}",
                s,
                Preset::variants().join(", ")
            )),
        }
    }
}
