use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use mzxic::builder::ChromatogramBuilder;
use mzxic::scan::{Scan, ScanBuilder};

use super::Preset;

/// A synthetic analyte with a Gaussian elution profile
struct Analyte {
    mz: f64,
    apex_rt: f64,
    sigma: f64,
    height: f64,
}

/// Generate a mock LC-MS run and build chromatograms from it
pub fn run(output: Option<PathBuf>, analytes: usize, duration: f64, preset: Preset) -> Result<()> {
    info!("mzxic - XIC Building Demo");
    info!("=========================");

    let analytes = generate_analytes(analytes, duration);
    let scans = generate_mock_lcms_run(&analytes, duration);

    info!(
        "Generated {} scans ({} total peaks) for {} analytes",
        scans.len(),
        scans.iter().map(|s| s.peak_count()).sum::<usize>(),
        analytes.len()
    );

    let builder = ChromatogramBuilder::new(preset.builder_config());
    let report = builder
        .build(&scans)
        .context("Failed to build chromatograms")?
        .context("Chromatogram building was canceled")?;

    println!("{}", report.stats);
    println!();
    println!(
        "{:>5}  {:>12}  {:>9}  {:>12}  {:>6}  {:>14}",
        "id", "m/z", "apex rt", "height", "points", "area"
    );
    for chrom in &report.chromatograms {
        println!(
            "{:>5}  {:>12.5}  {:>9.2}  {:>12.1}  {:>6}  {:>14.1}",
            chrom.id(),
            chrom.representative_mz(),
            chrom.apex_retention_time().unwrap_or(f64::NAN),
            chrom.height(),
            chrom.len(),
            chrom.area()
        );
    }

    if let Some(path) = output {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report.chromatograms)
            .context("Failed to write chromatograms")?;
        info!("Wrote chromatograms to {}", path.display());
    }

    Ok(())
}

fn generate_analytes(count: usize, duration: f64) -> Vec<Analyte> {
    (0..count)
        .map(|i| {
            let x = i as f64;
            Analyte {
                mz: 150.0 + x * 37.0173 + (x * 0.731).sin() * 5.0,
                apex_rt: duration * (0.1 + 0.8 * ((x * 0.618_034).fract())),
                sigma: 3.0 + (x * 0.377).sin().abs() * 4.0,
                height: 2e4 * (1.0 + (x * 1.234).sin().abs() * 49.0),
            }
        })
        .collect()
}

/// MS1 scans every 0.5 s with analyte signal plus random background peaks
fn generate_mock_lcms_run(analytes: &[Analyte], duration: f64) -> Vec<Scan> {
    let cycle_time = 0.5;
    let mut scans = Vec::new();
    let mut scan_number: i64 = 1;
    let mut rt = 0.0;

    while rt < duration {
        let mut builder = ScanBuilder::new(scan_number).ms_level(1).retention_time(rt);

        for (i, analyte) in analytes.iter().enumerate() {
            let z = (rt - analyte.apex_rt) / analyte.sigma;
            let intensity = analyte.height * (-0.5 * z * z).exp();
            if intensity < 50.0 {
                continue;
            }
            // about ±2 ppm of scan-to-scan mass jitter
            let jitter = (scan_number as f64 * 0.917 + i as f64 * 1.3).sin() * 2e-6 * analyte.mz;
            builder = builder.add_peak(analyte.mz + jitter, intensity as f32);
        }

        for j in 0..40 {
            let seed = scan_number as f64 * 12.9898 + j as f64 * 78.233;
            let noise = (seed.sin() * 43_758.545).fract().abs();
            let mz = 100.0 + noise * 1400.0;
            let intensity = 100.0 + (seed * 0.5).cos().abs() * 300.0;
            builder = builder.add_peak(mz, intensity as f32);
        }

        scans.push(builder.build());
        scan_number += 1;
        rt += cycle_time;
    }

    scans
}
