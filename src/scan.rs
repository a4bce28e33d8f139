//! Scan input types and the ingestion contract.
//!
//! A [`Scan`] is the unit the builder consumes: one centroided spectrum with an
//! optional retention time and an optional per-scan m/z tolerance. Peaks are kept
//! as parallel arrays (SoA) in whatever order the source produced them.

use serde::{Deserialize, Serialize};

use crate::tolerance::MzTolerance;

/// Parallel m/z and intensity arrays for one scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakArrays {
    /// Mass-to-charge ratios
    pub mz: Vec<f64>,
    /// Peak intensities
    pub intensity: Vec<f32>,
}

impl PeakArrays {
    /// Create peak arrays from owned vectors
    pub fn new(mz: Vec<f64>, intensity: Vec<f32>) -> Self {
        Self { mz, intensity }
    }

    /// Number of peaks
    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// Returns true if there are no peaks
    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Append a single peak
    pub fn push(&mut self, mz: f64, intensity: f32) {
        self.mz.push(mz);
        self.intensity.push(intensity);
    }

    /// Iterate over `(mz, intensity)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f32)> + '_ {
        self.mz.iter().copied().zip(self.intensity.iter().copied())
    }

    /// Validate that the arrays line up and hold finite values
    pub fn validate(&self) -> Result<(), String> {
        if self.mz.len() != self.intensity.len() {
            return Err(format!(
                "mz array has {} elements, intensity array has {}",
                self.mz.len(),
                self.intensity.len()
            ));
        }
        if let Some(idx) = self.mz.iter().position(|mz| !mz.is_finite()) {
            return Err(format!("non-finite m/z at peak {idx}"));
        }
        if let Some(idx) = self.intensity.iter().position(|i| !i.is_finite()) {
            return Err(format!("non-finite intensity at peak {idx}"));
        }
        Ok(())
    }
}

/// One centroided scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    /// Native scan number, used to identify the scan in errors
    pub scan_number: i64,
    /// MS level (1 for survey scans)
    #[serde(default = "default_ms_level")]
    pub ms_level: u8,
    /// Retention time; scans without one are skipped by the builder
    #[serde(default)]
    pub retention_time: Option<f64>,
    /// Centroided peaks, any order
    #[serde(default)]
    pub peaks: PeakArrays,
    /// Tolerance overriding the method default for this scan
    #[serde(default)]
    pub tolerance: Option<MzTolerance>,
}

fn default_ms_level() -> u8 {
    1
}

impl Scan {
    /// Create an MS1 scan with the given peaks
    pub fn new(scan_number: i64, retention_time: Option<f64>, peaks: PeakArrays) -> Self {
        Self {
            scan_number,
            ms_level: 1,
            retention_time,
            peaks,
            tolerance: None,
        }
    }

    /// Number of peaks in the scan
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }

    /// Validate the ingestion contract for a single scan.
    ///
    /// Invariants:
    /// - Peak arrays have identical lengths and finite values.
    /// - Retention time, when present, is finite.
    /// - MS level is at least 1.
    pub fn validate_contract(&self) -> Result<(), String> {
        if self.ms_level < 1 {
            return Err(format!("ms_level must be >= 1, got {}", self.ms_level));
        }

        if let Some(rt) = self.retention_time {
            if !rt.is_finite() {
                return Err(format!("retention_time must be finite, got {rt}"));
            }
        }

        if let Some(tolerance) = &self.tolerance {
            tolerance.validate()?;
        }

        self.peaks.validate()
    }
}

/// Fluent builder for [`Scan`]
#[derive(Debug, Clone)]
pub struct ScanBuilder {
    scan: Scan,
}

impl ScanBuilder {
    /// Start a new MS1 scan with no retention time and no peaks
    pub fn new(scan_number: i64) -> Self {
        Self {
            scan: Scan::new(scan_number, None, PeakArrays::default()),
        }
    }

    /// Set the MS level
    pub fn ms_level(mut self, level: u8) -> Self {
        self.scan.ms_level = level;
        self
    }

    /// Set the retention time
    pub fn retention_time(mut self, rt: f64) -> Self {
        self.scan.retention_time = Some(rt);
        self
    }

    /// Set a per-scan tolerance
    pub fn tolerance(mut self, tolerance: MzTolerance) -> Self {
        self.scan.tolerance = Some(tolerance);
        self
    }

    /// Add a single peak
    pub fn add_peak(mut self, mz: f64, intensity: f32) -> Self {
        self.scan.peaks.push(mz, intensity);
        self
    }

    /// Add peaks from parallel slices.
    ///
    /// Both slices are appended whole; slices of different lengths leave the
    /// scan failing [`Scan::validate_contract`].
    pub fn add_peaks(mut self, mz: &[f64], intensity: &[f32]) -> Self {
        self.scan.peaks.mz.extend_from_slice(mz);
        self.scan.peaks.intensity.extend_from_slice(intensity);
        self
    }

    /// Finish building
    pub fn build(self) -> Scan {
        self.scan
    }
}

/// Inclusive retention-time window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RtRange {
    /// Window start (inclusive)
    pub start: f64,
    /// Window end (inclusive)
    pub end: f64,
}

impl RtRange {
    /// Create a window
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Returns true if `rt` falls in the window
    pub fn contains(&self, rt: f64) -> bool {
        rt >= self.start && rt <= self.end
    }
}

/// Which scans take part in chromatogram building
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSelection {
    /// Only scans of this MS level (None = all levels)
    pub ms_level: Option<u8>,
    /// Only scans whose retention time is inside this window (None = all)
    pub rt_range: Option<RtRange>,
}

impl Default for ScanSelection {
    fn default() -> Self {
        Self {
            ms_level: Some(1),
            rt_range: None,
        }
    }
}

impl ScanSelection {
    /// Accept every scan
    pub fn all() -> Self {
        Self {
            ms_level: None,
            rt_range: None,
        }
    }

    /// Returns true if the scan passes the selection.
    ///
    /// Scans without a retention time pass an rt window; the builder skips them
    /// separately.
    pub fn matches(&self, scan: &Scan) -> bool {
        if let Some(level) = self.ms_level {
            if scan.ms_level != level {
                return false;
            }
        }
        match (self.rt_range, scan.retention_time) {
            (Some(range), Some(rt)) => range.contains(rt),
            _ => true,
        }
    }
}
