//! In-progress ion trace.

use super::types::Chromatogram;

/// Mutable accumulator for one candidate ion trace.
///
/// Samples are stored as parallel arrays in retention-time order. The most
/// recent `tail_len` samples form the building segment ("tail"): they have not
/// yet proven themselves and may be thrown away by [`remove_tail`]. Everything
/// before the tail belongs to committed segments and is never discarded.
///
/// Every m/z ever appended is also kept in a separate history that truncation
/// does not touch, so the representative m/z reflects all evidence seen.
///
/// [`remove_tail`]: BuildingChromatogram::remove_tail
#[derive(Debug, Clone)]
pub struct BuildingChromatogram {
    rt: Vec<f64>,
    mz: Vec<f64>,
    intensity: Vec<f32>,
    mz_history: Vec<f64>,
    tail_len: usize,
    committed_segments: usize,
}

impl BuildingChromatogram {
    /// Start a trace from its first point
    pub fn new(rt: f64, mz: f64, intensity: f32) -> Self {
        let mut trace = Self {
            rt: Vec::new(),
            mz: Vec::new(),
            intensity: Vec::new(),
            mz_history: Vec::new(),
            tail_len: 0,
            committed_segments: 0,
        };
        trace.add_point(rt, mz, intensity);
        trace
    }

    /// Append a point to the tail.
    ///
    /// `rt` must not be smaller than the previous sample's;
    /// [`HighestDataPointConnector::add_scan`] rejects out-of-order scans
    /// before any point is appended.
    ///
    /// [`HighestDataPointConnector::add_scan`]: super::HighestDataPointConnector::add_scan
    pub fn add_point(&mut self, rt: f64, mz: f64, intensity: f32) {
        debug_assert!(self.rt.last().map_or(true, |&last| rt >= last));
        self.rt.push(rt);
        self.mz.push(mz);
        self.intensity.push(intensity);
        self.mz_history.push(mz);
        self.tail_len += 1;
    }

    /// m/z of the most recent sample
    pub fn last_mz(&self) -> Option<f64> {
        self.mz.last().copied()
    }

    /// Intensity of the most recent sample
    pub fn last_intensity(&self) -> Option<f32> {
        self.intensity.last().copied()
    }

    /// Retention-time span of the tail, 0 when it holds fewer than two samples
    pub fn tail_time_span(&self) -> f64 {
        if self.tail_len < 2 {
            return 0.0;
        }
        let end = self.rt.len() - 1;
        let start = self.rt.len() - self.tail_len;
        self.rt[end] - self.rt[start]
    }

    /// Accept the tail as permanent history.
    ///
    /// Does nothing when the tail is empty, so repeated calls without an
    /// intervening [`add_point`](Self::add_point) count one segment.
    pub fn commit_tail(&mut self) {
        if self.tail_len == 0 {
            return;
        }
        self.committed_segments += 1;
        self.tail_len = 0;
    }

    /// Drop the uncommitted tail, keeping committed history
    pub fn remove_tail(&mut self) {
        let keep = self.rt.len() - self.tail_len;
        self.rt.truncate(keep);
        self.mz.truncate(keep);
        self.intensity.truncate(keep);
        self.tail_len = 0;
    }

    /// Number of samples in the uncommitted tail
    pub fn tail_len(&self) -> usize {
        self.tail_len
    }

    /// Number of committed segments
    pub fn committed_segments(&self) -> usize {
        self.committed_segments
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.rt.len()
    }

    /// Returns true if the trace holds no samples
    pub fn is_empty(&self) -> bool {
        self.rt.is_empty()
    }

    /// Maximum intensity over all current samples
    pub fn height(&self) -> f32 {
        self.intensity.iter().copied().fold(0.0_f32, f32::max)
    }

    /// Median of every m/z ever appended, including truncated samples
    pub fn median_mz(&self) -> Option<f64> {
        median(&mut self.mz_history.clone())
    }

    /// Retention times of the current samples
    pub fn retention_times(&self) -> &[f64] {
        &self.rt
    }

    /// m/z values of the current samples
    pub fn mz_values(&self) -> &[f64] {
        &self.mz
    }

    /// Intensities of the current samples
    pub fn intensities(&self) -> &[f32] {
        &self.intensity
    }

    /// Freeze into an output chromatogram
    pub(crate) fn into_chromatogram(self, id: u32) -> Chromatogram {
        let representative_mz = self.median_mz().unwrap_or(f64::NAN);
        Chromatogram::from_trace(id, self.rt, self.mz, self.intensity, representative_mz)
    }
}

/// Statistical median; averages the two middle values for even lengths.
///
/// The slice is partially reordered.
fn median(values: &mut [f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    let (lower_half, &mut upper_mid, _) = values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
    if n % 2 == 1 {
        return Some(upper_mid);
    }

    let lower_mid = lower_half
        .iter()
        .copied()
        .max_by(|a, b| a.total_cmp(b))
        .unwrap_or(upper_mid);
    Some((lower_mid + upper_mid) / 2.0)
}
