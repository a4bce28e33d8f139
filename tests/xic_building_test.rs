//! End-to-end tests for XIC construction through the public builder API
//!
//! Each test feeds a small hand-made scan sequence through
//! `ChromatogramBuilder` and checks the emitted chromatograms.

use mzxic::prelude::*;
use std::thread;

fn scan(number: i64, rt: f64, peaks: &[(f64, f32)]) -> Scan {
    let mut builder = ScanBuilder::new(number).retention_time(rt);
    for &(mz, intensity) in peaks {
        builder = builder.add_peak(mz, intensity);
    }
    builder.build()
}

fn config(min_time_span: f64, min_height: f32, tolerance: f64) -> BuilderConfig {
    BuilderConfig {
        min_time_span,
        min_height,
        default_tolerance: Some(MzTolerance::Absolute(tolerance)),
        ..Default::default()
    }
}

fn build(config: BuilderConfig, scans: &[Scan]) -> BuildReport {
    ChromatogramBuilder::new(config)
        .build(scans)
        .unwrap()
        .expect("run was not canceled")
}

/// A single ion eluting over three scans
#[test]
fn test_simple_trace() {
    let scans = vec![
        scan(1, 0.0, &[(100.0, 10.0)]),
        scan(2, 1.0, &[(100.0, 20.0)]),
        scan(3, 2.0, &[(100.0, 5.0)]),
    ];

    let report = build(config(1.5, 8.0, 0.01), &scans);

    assert_eq!(report.chromatograms.len(), 1);
    let chrom = &report.chromatograms[0];
    assert_eq!(chrom.id(), 1);
    assert_eq!(chrom.retention_times(), &[0.0, 1.0, 2.0]);
    assert_eq!(chrom.intensities(), &[10.0, 20.0, 5.0]);
    assert_eq!(chrom.representative_mz(), 100.0);
    assert_eq!(chrom.height(), 20.0);
    assert_eq!(chrom.apex_retention_time(), Some(1.0));
    assert_eq!(report.stats.chromatograms_emitted, 1);
}

/// Two co-eluting ions with neighbouring masses stay in separate traces
#[test]
fn test_neighbouring_ions_stay_separate() {
    let scans = vec![
        scan(1, 0.0, &[(200.000, 1000.0), (200.015, 300.0)]),
        scan(2, 1.0, &[(200.001, 1200.0), (200.014, 350.0)]),
        scan(3, 2.0, &[(200.000, 900.0), (200.015, 320.0)]),
    ];

    let report = build(config(1.0, 0.0, 0.01), &scans);

    assert_eq!(report.chromatograms.len(), 2);
    let strong = &report.chromatograms[0];
    let weak = &report.chromatograms[1];
    assert_eq!(strong.intensities(), &[1000.0, 1200.0, 900.0]);
    assert_eq!(weak.intensities(), &[300.0, 350.0, 320.0]);
    assert_eq!(strong.representative_mz(), 200.000);
    assert_eq!(weak.representative_mz(), 200.015);
}

/// When windows overlap, the weaker peak loses to the stronger trace and its
/// own trace sees a gap
#[test]
fn test_overlapping_windows_favor_stronger_trace() {
    let scans = vec![
        scan(1, 0.0, &[(200.000, 1000.0), (200.008, 300.0)]),
        scan(2, 1.0, &[(200.001, 1200.0), (200.007, 350.0)]),
        scan(3, 2.0, &[(200.000, 900.0)]),
    ];

    let report = build(config(1.0, 0.0, 0.01), &scans);

    assert_eq!(report.chromatograms.len(), 1);
    assert_eq!(report.chromatograms[0].intensities(), &[1000.0, 1200.0, 900.0]);
    assert_eq!(report.stats.peaks_skipped, 1);
    assert_eq!(report.stats.traces_dropped_span, 1);
}

/// A gap after a committed run keeps the trace, later points extend it
#[test]
fn test_gap_after_committed_run() {
    let scans = vec![
        scan(1, 0.0, &[(300.0, 50.0)]),
        scan(2, 1.0, &[(300.0, 60.0)]),
        scan(3, 2.0, &[]),
        scan(4, 3.0, &[(300.0, 70.0)]),
        scan(5, 4.0, &[(300.0, 40.0)]),
    ];

    let report = build(config(0.5, 0.0, 0.01), &scans);

    assert_eq!(report.chromatograms.len(), 1);
    assert_eq!(
        report.chromatograms[0].retention_times(),
        &[0.0, 1.0, 3.0, 4.0]
    );
}

/// Single-scan blips separated by gaps never reach the minimum span
#[test]
fn test_isolated_points_are_dropped() {
    let scans = vec![
        scan(1, 0.0, &[]),
        scan(2, 1.0, &[(400.0, 500.0)]),
        scan(3, 2.0, &[]),
        scan(4, 3.0, &[(400.0, 500.0)]),
        scan(5, 4.0, &[]),
    ];

    let report = build(config(0.5, 0.0, 0.01), &scans);

    assert!(report.chromatograms.is_empty());
    assert_eq!(report.stats.traces_started, 2);
    assert_eq!(report.stats.traces_dropped_span, 2);
}

/// A short burst after a committed run is cut off, the committed part survives
#[test]
fn test_short_tail_is_truncated() {
    let scans = vec![
        scan(1, 0.0, &[(500.0, 10.0)]),
        scan(2, 1.0, &[(500.0, 30.0)]),
        scan(3, 2.0, &[(500.0, 20.0)]),
        scan(4, 3.0, &[]),
        scan(5, 4.0, &[(500.0, 90.0)]),
        scan(6, 5.0, &[]),
    ];

    let report = build(config(1.5, 0.0, 0.01), &scans);

    assert_eq!(report.chromatograms.len(), 1);
    let chrom = &report.chromatograms[0];
    assert_eq!(chrom.retention_times(), &[0.0, 1.0, 2.0]);
    assert_eq!(chrom.height(), 30.0);
}

/// Peaks drifting within tolerance stay in one trace
#[test]
fn test_mass_drift_within_tolerance() {
    let scans: Vec<Scan> = (0..10)
        .map(|i| scan(i + 1, i as f64, &[(600.0 + i as f64 * 0.004, 100.0)]))
        .collect();

    let report = build(config(1.0, 0.0, 0.005), &scans);

    assert_eq!(report.chromatograms.len(), 1);
    assert_eq!(report.chromatograms[0].len(), 10);
}

/// A jump larger than the tolerance starts a new trace
#[test]
fn test_mass_jump_starts_new_trace() {
    let scans = vec![
        scan(1, 0.0, &[(700.0, 100.0)]),
        scan(2, 1.0, &[(700.0, 100.0)]),
        scan(3, 2.0, &[(700.1, 100.0)]),
        scan(4, 3.0, &[(700.1, 100.0)]),
    ];

    let report = build(config(1.0, 0.0, 0.01), &scans);

    assert_eq!(report.chromatograms.len(), 2);
    assert_eq!(report.chromatograms[0].retention_times(), &[0.0, 1.0]);
    assert_eq!(report.chromatograms[1].retention_times(), &[2.0, 3.0]);
}

/// Relative tolerance scales with m/z
#[test]
fn test_ppm_tolerance() {
    let scans = vec![
        scan(1, 0.0, &[(1000.0, 100.0), (100.0, 100.0)]),
        scan(2, 1.0, &[(1000.008, 100.0), (100.008, 100.0)]),
    ];

    let config = BuilderConfig {
        min_time_span: 1.0,
        default_tolerance: Some(MzTolerance::Ppm(10.0)),
        ..Default::default()
    };
    let report = build(config, &scans);

    // 10 ppm is 0.01 at m/z 1000 but only 0.001 at m/z 100
    assert_eq!(report.chromatograms.len(), 1);
    assert!((report.chromatograms[0].representative_mz() - 1000.004).abs() < 1e-9);
}

#[test]
fn test_out_of_order_input_is_rejected() {
    let scans = vec![
        scan(1, 0.0, &[(100.0, 1.0)]),
        scan(2, 2.0, &[(100.0, 1.0)]),
        scan(3, 1.0, &[(100.0, 1.0)]),
    ];

    let err = ChromatogramBuilder::new(BuilderConfig::default())
        .build(&scans)
        .unwrap_err();
    assert!(matches!(err, BuildError::OutOfOrderScans { scan_number: 3, .. }));
}

/// MS2 scans interleaved with MS1 do not break MS1 traces
#[test]
fn test_ms2_scans_are_not_gaps() {
    let mut scans = Vec::new();
    for i in 0..6 {
        let rt = i as f64;
        if i % 2 == 0 {
            scans.push(scan(i + 1, rt, &[(800.0, 1000.0)]));
        } else {
            scans.push(
                ScanBuilder::new(i + 1)
                    .ms_level(2)
                    .retention_time(rt)
                    .add_peak(150.0, 10.0)
                    .build(),
            );
        }
    }

    let report = build(config(1.5, 0.0, 0.01), &scans);

    assert_eq!(report.chromatograms.len(), 1);
    assert_eq!(report.chromatograms[0].retention_times(), &[0.0, 2.0, 4.0]);
    assert_eq!(report.stats.scans_skipped_selection, 3);
}

#[test]
fn test_cancel_from_another_thread() {
    let scans: Vec<Scan> = (0..2000)
        .map(|i| scan(i + 1, i as f64, &[(100.0, 1.0)]))
        .collect();

    let builder = ChromatogramBuilder::new(BuilderConfig::default());
    let token = CancellationToken::new();
    let remote = token.clone();

    thread::spawn(move || remote.cancel()).join().unwrap();

    let progress = ProgressTracker::new();
    assert!(builder
        .build_with(&scans, &token, &progress)
        .unwrap()
        .is_none());
    assert_eq!(progress.processed(), 0);
}

#[test]
fn test_connector_can_be_driven_directly() {
    let tolerance = MzTolerance::Absolute(0.01);
    let mut connector = HighestDataPointConnector::new(1.0, 0.0);

    connector
        .add_scan(&scan(1, 0.0, &[(100.0, 5.0), (250.0, 7.0)]), &tolerance)
        .unwrap();
    connector
        .add_scan(&scan(2, 1.0, &[(100.0, 6.0), (250.0, 8.0)]), &tolerance)
        .unwrap();
    assert_eq!(connector.active_traces().len(), 2);

    let chromatograms = connector.finish();
    assert_eq!(chromatograms.len(), 2);
    // inserted in intensity order within the first scan
    assert_eq!(chromatograms[0].representative_mz(), 250.0);
    assert_eq!(chromatograms[1].representative_mz(), 100.0);
    assert!(connector.active_traces().is_empty());
}
