use serde::Serialize;

/// Errors raised when assembling a chromatogram from raw parts
#[derive(Debug, thiserror::Error)]
pub enum ChromatogramError {
    /// Parallel arrays do not line up
    #[error("Array length mismatch: rt array has {rt_len} elements, mz array has {mz_len}, intensity array has {intensity_len}")]
    ArrayLengthMismatch {
        /// Length of the retention-time array
        rt_len: usize,
        /// Length of the m/z array
        mz_len: usize,
        /// Length of the intensity array
        intensity_len: usize,
    },

    /// Retention times are not non-decreasing
    #[error("Retention times decrease at point {index}")]
    UnorderedRetentionTimes {
        /// Index of the first point with a smaller rt than its predecessor
        index: usize,
    },
}

/// Finished extracted-ion chromatogram.
///
/// Immutable once built: the arrays are only reachable through shared slices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chromatogram {
    id: u32,
    representative_mz: f64,
    retention_times: Vec<f64>,
    mz_values: Vec<f64>,
    intensities: Vec<f32>,
}

impl Chromatogram {
    /// Assemble a chromatogram from parallel arrays, validating their shape
    pub fn new(
        id: u32,
        representative_mz: f64,
        retention_times: Vec<f64>,
        mz_values: Vec<f64>,
        intensities: Vec<f32>,
    ) -> Result<Self, ChromatogramError> {
        if retention_times.len() != mz_values.len() || retention_times.len() != intensities.len() {
            return Err(ChromatogramError::ArrayLengthMismatch {
                rt_len: retention_times.len(),
                mz_len: mz_values.len(),
                intensity_len: intensities.len(),
            });
        }

        if let Some(index) = retention_times.windows(2).position(|w| w[1] < w[0]) {
            return Err(ChromatogramError::UnorderedRetentionTimes { index: index + 1 });
        }

        Ok(Self {
            id,
            representative_mz,
            retention_times,
            mz_values,
            intensities,
        })
    }

    pub(crate) fn from_trace(
        id: u32,
        retention_times: Vec<f64>,
        mz_values: Vec<f64>,
        intensities: Vec<f32>,
        representative_mz: f64,
    ) -> Self {
        Self {
            id,
            representative_mz,
            retention_times,
            mz_values,
            intensities,
        }
    }

    /// Sequential identifier, assigned in emission order starting at 1
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Median m/z over every sample the trace ever recorded
    pub fn representative_mz(&self) -> f64 {
        self.representative_mz
    }

    /// Retention times, non-decreasing
    pub fn retention_times(&self) -> &[f64] {
        &self.retention_times
    }

    /// Per-point m/z values
    pub fn mz_values(&self) -> &[f64] {
        &self.mz_values
    }

    /// Per-point intensities
    pub fn intensities(&self) -> &[f32] {
        &self.intensities
    }

    /// Number of data points
    pub fn len(&self) -> usize {
        self.retention_times.len()
    }

    /// Returns true if the chromatogram has no points
    pub fn is_empty(&self) -> bool {
        self.retention_times.is_empty()
    }

    /// Maximum intensity
    pub fn height(&self) -> f32 {
        self.intensities.iter().copied().fold(0.0_f32, f32::max)
    }

    /// Retention time of the most intense point (first one on ties)
    pub fn apex_retention_time(&self) -> Option<f64> {
        let mut apex: Option<(usize, f32)> = None;
        for (idx, &intensity) in self.intensities.iter().enumerate() {
            if apex.map_or(true, |(_, best)| intensity > best) {
                apex = Some((idx, intensity));
            }
        }
        apex.map(|(idx, _)| self.retention_times[idx])
    }

    /// First and last retention time
    pub fn rt_range(&self) -> Option<(f64, f64)> {
        match (self.retention_times.first(), self.retention_times.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }

    /// Time between the first and last point
    pub fn duration(&self) -> f64 {
        self.rt_range().map_or(0.0, |(first, last)| last - first)
    }

    /// Smallest and largest m/z
    pub fn mz_range(&self) -> Option<(f64, f64)> {
        let mut values = self.mz_values.iter().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), mz| (lo.min(mz), hi.max(mz))))
    }

    /// Trapezoidal area under the trace (intensity × rt units)
    pub fn area(&self) -> f64 {
        self.retention_times
            .windows(2)
            .zip(self.intensities.windows(2))
            .map(|(rt, intensity)| {
                0.5 * (f64::from(intensity[0]) + f64::from(intensity[1])) * (rt[1] - rt[0])
            })
            .sum()
    }
}
