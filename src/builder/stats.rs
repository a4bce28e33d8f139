use std::fmt;

use serde::Serialize;

use crate::chromatogram::ConnectorStats;

/// Statistics from a completed build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Scans in the input sequence
    pub scans_total: usize,
    /// Scans linked by the connector
    pub scans_processed: usize,
    /// Scans excluded by the scan selection
    pub scans_skipped_selection: usize,
    /// Selected scans skipped for lacking a retention time
    pub scans_skipped_no_rt: usize,
    /// Peaks in processed scans
    pub peaks_seen: usize,
    /// Peaks discarded by the noise floor
    pub peaks_below_noise: usize,
    /// Peaks that extended an existing trace
    pub peaks_linked: usize,
    /// Peaks whose best trace was already extended in the same scan
    pub peaks_skipped: usize,
    /// Traces started
    pub traces_started: usize,
    /// Traces that never reached the minimum time span
    pub traces_dropped_span: usize,
    /// Traces below the minimum height
    pub traces_dropped_height: usize,
    /// Chromatograms in the result
    pub chromatograms_emitted: usize,
}

impl BuildStats {
    pub(crate) fn absorb(&mut self, connector: ConnectorStats) {
        self.peaks_seen = connector.peaks_seen;
        self.peaks_below_noise = connector.peaks_below_noise;
        self.peaks_linked = connector.peaks_linked;
        self.peaks_skipped = connector.peaks_skipped;
        self.traces_started = connector.traces_started;
        self.traces_dropped_span = connector.traces_dropped_span;
        self.traces_dropped_height = connector.traces_dropped_height;
    }
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Built {} chromatograms from {}/{} scans ({} peaks, {} traces started)",
            self.chromatograms_emitted,
            self.scans_processed,
            self.scans_total,
            self.peaks_seen,
            self.traces_started
        )
    }
}
