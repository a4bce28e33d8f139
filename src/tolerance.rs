//! # m/z Tolerance
//!
//! Tolerance windows used to decide whether two centroids belong to the same ion.
//! The connector only ever asks one question of a tolerance: "what is the closed
//! m/z interval around this reference value?" Everything else about how the
//! window is shaped stays inside [`MzTolerance`].

use serde::{Deserialize, Serialize};

/// Closed m/z interval `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MzRange {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
}

impl MzRange {
    /// Create a range from its bounds
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Returns true if `mz` lies inside the closed interval
    #[inline]
    pub fn contains(&self, mz: f64) -> bool {
        mz >= self.lower && mz <= self.upper
    }

    /// Width of the interval in Th
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Matching tolerance around a reference m/z.
///
/// Deserializes from snake_case tagged values, e.g. in TOML:
///
/// ```toml
/// default_tolerance = { ppm = 5.0 }
/// default_tolerance = { absolute_or_ppm = { absolute = 0.002, ppm = 10.0 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MzTolerance {
    /// Fixed window of ± the given value in Th
    Absolute(f64),
    /// Window of ± the given parts-per-million of the reference m/z
    Ppm(f64),
    /// Whichever of the absolute and ppm windows is wider at the reference m/z
    AbsoluteOrPpm {
        /// Absolute half-width in Th
        absolute: f64,
        /// Relative half-width in ppm
        ppm: f64,
    },
    /// Absolute offsets that differ below and above the reference m/z
    Asymmetric {
        /// Distance below the reference in Th
        below: f64,
        /// Distance above the reference in Th
        above: f64,
    },
}

impl Default for MzTolerance {
    fn default() -> Self {
        Self::AbsoluteOrPpm {
            absolute: 0.002,
            ppm: 10.0,
        }
    }
}

impl MzTolerance {
    /// The acceptable interval around `center`
    pub fn range(&self, center: f64) -> MzRange {
        match *self {
            MzTolerance::Absolute(delta) => MzRange::new(center - delta, center + delta),
            MzTolerance::Ppm(ppm) => {
                let delta = ppm_to_th(center, ppm);
                MzRange::new(center - delta, center + delta)
            }
            MzTolerance::AbsoluteOrPpm { absolute, ppm } => {
                let delta = absolute.max(ppm_to_th(center, ppm));
                MzRange::new(center - delta, center + delta)
            }
            MzTolerance::Asymmetric { below, above } => {
                MzRange::new(center - below, center + above)
            }
        }
    }

    /// Check that all widths are finite and non-negative
    pub fn validate(&self) -> Result<(), String> {
        let widths = match *self {
            MzTolerance::Absolute(delta) => vec![("absolute", delta)],
            MzTolerance::Ppm(ppm) => vec![("ppm", ppm)],
            MzTolerance::AbsoluteOrPpm { absolute, ppm } => {
                vec![("absolute", absolute), ("ppm", ppm)]
            }
            MzTolerance::Asymmetric { below, above } => vec![("below", below), ("above", above)],
        };

        for (name, value) in widths {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "tolerance {name} must be finite and non-negative, got {value}"
                ));
            }
        }
        Ok(())
    }
}

#[inline]
fn ppm_to_th(mz: f64, ppm: f64) -> f64 {
    mz.abs() * ppm * 1e-6
}
