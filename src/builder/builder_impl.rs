use log::{debug, info, warn};

use super::config::BuilderConfig;
use super::error::BuildError;
use super::progress::{CancellationToken, ProgressTracker};
use super::stats::BuildStats;
use crate::chromatogram::{Chromatogram, HighestDataPointConnector};
use crate::scan::Scan;
use crate::tolerance::MzTolerance;

/// Result of a completed build
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Emitted chromatograms in id order
    pub chromatograms: Vec<Chromatogram>,
    /// Run statistics
    pub stats: BuildStats,
}

/// Drives the connector over a scan sequence.
///
/// The builder only holds configuration. Every call to
/// [`build`](Self::build) or [`build_with`](Self::build_with) is an
/// independent run with its own connector, cancellation token and progress
/// tracker, so one builder can serve several runs at once.
#[derive(Debug, Clone)]
pub struct ChromatogramBuilder {
    config: BuilderConfig,
}

impl ChromatogramBuilder {
    /// Create a builder with the given configuration
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Builder configuration
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Tolerance for `scan`: its own if it has one, else the method default
    pub fn resolve_tolerance(&self, scan: &Scan) -> Result<MzTolerance, BuildError> {
        scan.tolerance
            .or(self.config.default_tolerance)
            .ok_or(BuildError::NoToleranceAvailable {
                scan_number: scan.scan_number,
            })
    }

    /// Build chromatograms from scans in retention-time order.
    ///
    /// Returns `Ok(None)` when the run was canceled; no partial result is
    /// produced in that case.
    pub fn build(&self, scans: &[Scan]) -> Result<Option<BuildReport>, BuildError> {
        self.build_with(scans, &CancellationToken::new(), &ProgressTracker::new())
    }

    /// Like [`build`](Self::build), with caller-owned cancellation and
    /// progress handles for this run only.
    ///
    /// `cancel` is polled before each scan. `progress` is reset when the run
    /// starts and advanced once per input scan.
    pub fn build_with(
        &self,
        scans: &[Scan],
        cancel: &CancellationToken,
        progress: &ProgressTracker,
    ) -> Result<Option<BuildReport>, BuildError> {
        self.config.validate()?;
        if scans.is_empty() {
            return Err(BuildError::EmptyInput);
        }
        self.validate_scans(scans)?;

        info!(
            "Building chromatograms from {} scans (min span {}, min height {})",
            scans.len(),
            self.config.min_time_span,
            self.config.min_height
        );

        let mut connector =
            HighestDataPointConnector::new(self.config.min_time_span, self.config.min_height)
                .with_noise_floor(self.config.noise_floor);
        let mut stats = BuildStats {
            scans_total: scans.len(),
            ..Default::default()
        };
        progress.start(scans.len());

        for scan in scans {
            if cancel.is_canceled() {
                warn!(
                    "Chromatogram building canceled after {}/{} scans",
                    progress.processed(),
                    scans.len()
                );
                return Ok(None);
            }

            if !self.config.scan_selection.matches(scan) {
                stats.scans_skipped_selection += 1;
            } else if scan.retention_time.is_none() {
                debug!("Skipping scan {}: no retention time", scan.scan_number);
                stats.scans_skipped_no_rt += 1;
            } else {
                let tolerance = self.resolve_tolerance(scan)?;
                connector.add_scan(scan, &tolerance)?;
                stats.scans_processed += 1;
            }

            let processed = progress.advance();
            log_progress(processed, scans.len(), self.config.progress_interval);
        }

        let chromatograms = connector.finish();
        stats.absorb(connector.stats());
        stats.chromatograms_emitted = chromatograms.len();

        info!("{}", stats);
        debug!(
            "Dropped {} traces by span and {} by height; {} peaks below noise floor",
            stats.traces_dropped_span, stats.traces_dropped_height, stats.peaks_below_noise
        );

        Ok(Some(BuildReport {
            chromatograms,
            stats,
        }))
    }

    /// Contract and ordering checks over the selected scans
    fn validate_scans(&self, scans: &[Scan]) -> Result<(), BuildError> {
        let mut previous: Option<f64> = None;
        for scan in scans
            .iter()
            .filter(|s| self.config.scan_selection.matches(s))
        {
            scan.validate_contract()
                .map_err(|reason| BuildError::InvalidScan {
                    scan_number: scan.scan_number,
                    reason,
                })?;

            let Some(rt) = scan.retention_time else {
                continue;
            };
            if let Some(prev) = previous {
                if rt < prev {
                    return Err(BuildError::OutOfOrderScans {
                        scan_number: scan.scan_number,
                        retention_time: rt,
                        previous_retention_time: prev,
                    });
                }
            }
            previous = Some(rt);
        }
        Ok(())
    }
}

fn log_progress(processed: usize, total: usize, interval: usize) {
    if processed % interval == 0 {
        let pct = (processed as f64 / total as f64) * 100.0;
        info!("Progress: {}/{} scans ({:.1}%)", processed, total, pct);
    }
}
