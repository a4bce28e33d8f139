use log::debug;

use super::building::BuildingChromatogram;
use super::error::ConnectorError;
use super::types::Chromatogram;
use crate::scan::{PeakArrays, Scan};
use crate::tolerance::MzTolerance;

/// Counters collected while connecting scans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectorStats {
    /// Scans passed to [`HighestDataPointConnector::add_scan`]
    pub scans_added: usize,
    /// Peaks seen before noise filtering
    pub peaks_seen: usize,
    /// Peaks discarded by the noise floor
    pub peaks_below_noise: usize,
    /// Peaks appended to an existing trace
    pub peaks_linked: usize,
    /// Peaks skipped because their best trace was already extended this scan
    pub peaks_skipped: usize,
    /// Traces created from unmatched peaks
    pub traces_started: usize,
    /// Traces dropped for never reaching the minimum time span
    pub traces_dropped_span: usize,
    /// Traces dropped at finish for falling below the minimum height
    pub traces_dropped_height: usize,
}

/// What happens to a trace that saw no match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapOutcome {
    Committed,
    Truncated,
    Dropped,
}

/// Per-scan sort buffers, reused across scans
#[derive(Debug, Default)]
struct ScanScratch {
    mz: Vec<f64>,
    intensity: Vec<f32>,
    order: Vec<usize>,
}

impl ScanScratch {
    /// Load peaks at or above the noise floor and order them by descending
    /// intensity. Returns the number of peaks discarded.
    fn load(&mut self, peaks: &PeakArrays, noise_floor: Option<f32>) -> usize {
        self.mz.clear();
        self.intensity.clear();
        self.order.clear();

        let mut below_noise = 0;
        for (mz, intensity) in peaks.iter() {
            if noise_floor.map_or(false, |floor| intensity < floor) {
                below_noise += 1;
                continue;
            }
            self.mz.push(mz);
            self.intensity.push(intensity);
        }

        self.order.extend(0..self.mz.len());
        let intensity = &self.intensity;
        // stable, so equal intensities keep their input order
        self.order
            .sort_by(|&a, &b| intensity[b].total_cmp(&intensity[a]));

        below_noise
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Greedy highest-data-point connector.
///
/// Owns every trace under construction. Each scan's peaks are visited from the
/// most to the least intense; a peak extends the trace whose last m/z window
/// contains it and whose last intensity is highest, or starts a new trace. A
/// trace accepts at most one point per scan. Traces without a match in a scan
/// are settled immediately: a tail spanning at least `min_time_span` is
/// committed, a short tail on a trace with committed history is truncated, and
/// anything else is dropped.
///
/// Traces live in insertion order so identical input yields identical output.
#[derive(Debug)]
pub struct HighestDataPointConnector {
    min_time_span: f64,
    min_height: f32,
    noise_floor: Option<f32>,
    active: Vec<BuildingChromatogram>,
    matched: Vec<bool>,
    last_rt: Option<f64>,
    scratch: ScanScratch,
    stats: ConnectorStats,
}

impl HighestDataPointConnector {
    /// Create a connector with the emission thresholds
    pub fn new(min_time_span: f64, min_height: f32) -> Self {
        Self {
            min_time_span,
            min_height,
            noise_floor: None,
            active: Vec::new(),
            matched: Vec::new(),
            last_rt: None,
            scratch: ScanScratch::default(),
            stats: ConnectorStats::default(),
        }
    }

    /// Discard peaks below `noise_floor` before matching
    pub fn with_noise_floor(mut self, noise_floor: Option<f32>) -> Self {
        self.noise_floor = noise_floor;
        self
    }

    /// Link one scan's peaks into the active traces.
    ///
    /// Scans must arrive in non-decreasing retention-time order; an earlier
    /// retention time than the last accepted scan's is an error. A scan whose
    /// peaks all fall below the noise floor (or that has none) only closes
    /// gaps and needs no retention time; otherwise a missing retention time is
    /// an error. The connector is left untouched on error.
    pub fn add_scan(&mut self, scan: &Scan, tolerance: &MzTolerance) -> Result<(), ConnectorError> {
        if let (Some(rt), Some(previous)) = (scan.retention_time, self.last_rt) {
            if rt < previous {
                return Err(ConnectorError::OutOfOrderScan {
                    scan_number: scan.scan_number,
                    retention_time: rt,
                    previous_retention_time: previous,
                });
            }
        }

        let below_noise = self.scratch.load(&scan.peaks, self.noise_floor);

        let alive = self.active.len();
        self.matched.clear();
        self.matched.resize(alive, false);

        if !self.scratch.is_empty() {
            let rt = scan
                .retention_time
                .ok_or(ConnectorError::MissingRetentionTime {
                    scan_number: scan.scan_number,
                })?;
            self.link_peaks(rt, alive, tolerance);
        }

        if scan.retention_time.is_some() {
            self.last_rt = scan.retention_time;
        }
        self.stats.scans_added += 1;
        self.stats.peaks_seen += scan.peak_count();
        self.stats.peaks_below_noise += below_noise;

        self.settle_unmatched();
        Ok(())
    }

    fn link_peaks(&mut self, rt: f64, alive: usize, tolerance: &MzTolerance) {
        for i in 0..self.scratch.order.len() {
            let idx = self.scratch.order[i];
            let mz = self.scratch.mz[idx];
            let intensity = self.scratch.intensity[idx];

            match self.best_candidate(alive, mz, tolerance) {
                Some(pos) if self.matched[pos] => {
                    self.stats.peaks_skipped += 1;
                }
                Some(pos) => {
                    self.active[pos].add_point(rt, mz, intensity);
                    self.matched[pos] = true;
                    self.stats.peaks_linked += 1;
                }
                None => {
                    self.active.push(BuildingChromatogram::new(rt, mz, intensity));
                    self.matched.push(true);
                    self.stats.traces_started += 1;
                }
            }
        }
    }

    /// Trace alive at the start of the scan whose window around its last m/z
    /// contains `mz` and whose last intensity is highest. Ties go to the
    /// earliest-inserted trace.
    fn best_candidate(&self, alive: usize, mz: f64, tolerance: &MzTolerance) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (pos, trace) in self.active[..alive].iter().enumerate() {
            let (Some(last_mz), Some(last_intensity)) = (trace.last_mz(), trace.last_intensity())
            else {
                continue;
            };
            if !tolerance.range(last_mz).contains(mz) {
                continue;
            }
            if best.map_or(true, |(_, best_intensity)| last_intensity > best_intensity) {
                best = Some((pos, last_intensity));
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn settle_unmatched(&mut self) {
        let min_time_span = self.min_time_span;
        let stats = &mut self.stats;
        let mut matched = self.matched.iter();
        self.active.retain_mut(|trace| {
            if matched.next().copied().unwrap_or(true) {
                return true;
            }
            match settle_gap(trace, min_time_span) {
                GapOutcome::Committed | GapOutcome::Truncated => true,
                GapOutcome::Dropped => {
                    stats.traces_dropped_span += 1;
                    false
                }
            }
        });
    }

    /// Settle every remaining trace and emit the survivors.
    ///
    /// Traces whose height is below the minimum are dropped. Ids are assigned
    /// from 1 in insertion order. The connector is empty afterwards.
    pub fn finish(&mut self) -> Vec<Chromatogram> {
        let traces = std::mem::take(&mut self.active);
        self.matched.clear();
        self.last_rt = None;

        let mut chromatograms = Vec::with_capacity(traces.len());
        for mut trace in traces {
            if settle_gap(&mut trace, self.min_time_span) == GapOutcome::Dropped {
                self.stats.traces_dropped_span += 1;
                continue;
            }
            if trace.height() < self.min_height {
                self.stats.traces_dropped_height += 1;
                continue;
            }
            let id = chromatograms.len() as u32 + 1;
            chromatograms.push(trace.into_chromatogram(id));
        }

        debug!(
            "Connector finished: {} chromatograms, {} dropped by span, {} dropped by height",
            chromatograms.len(),
            self.stats.traces_dropped_span,
            self.stats.traces_dropped_height
        );

        chromatograms
    }

    /// Traces currently under construction, in insertion order
    pub fn active_traces(&self) -> &[BuildingChromatogram] {
        &self.active
    }

    /// Counters collected so far
    pub fn stats(&self) -> ConnectorStats {
        self.stats
    }
}

fn settle_gap(trace: &mut BuildingChromatogram, min_time_span: f64) -> GapOutcome {
    if trace.tail_time_span() >= min_time_span {
        trace.commit_tail();
        GapOutcome::Committed
    } else if trace.committed_segments() > 0 {
        trace.remove_tail();
        GapOutcome::Truncated
    } else {
        GapOutcome::Dropped
    }
}
