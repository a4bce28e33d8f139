use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use mzxic::builder::{BuildStats, ChromatogramBuilder};
use mzxic::chromatogram::Chromatogram;

use super::config::{BuilderOverrides, Config};
use super::input::read_scans;
use super::Preset;

/// JSON document written by `mzxic build`
#[derive(Serialize)]
struct BuildOutput<'a> {
    stats: &'a BuildStats,
    chromatograms: &'a [Chromatogram],
}

/// Build chromatograms from a scan file
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    preset: Preset,
    config_path: Option<PathBuf>,
    flags: BuilderOverrides,
) -> Result<()> {
    let mut builder_config = preset.builder_config();
    if let Some(path) = &config_path {
        info!("Loading config from {}", path.display());
        Config::from_file(path)?.builder.apply(&mut builder_config);
    }
    flags.apply(&mut builder_config);

    info!("Reading scans from {}", input.display());
    let scans = read_scans(&input)?;
    info!("Read {} scans (preset: {})", scans.len(), preset);

    let builder = ChromatogramBuilder::new(builder_config);
    let report = builder
        .build(&scans)
        .with_context(|| format!("Failed to build chromatograms from {}", input.display()))?
        .context("Chromatogram building was canceled")?;

    let document = BuildOutput {
        stats: &report.stats,
        chromatograms: &report.chromatograms,
    };

    match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &document)
                .context("Failed to write chromatograms")?;
            writer.flush()?;
            info!("Wrote {} chromatograms to {}", report.chromatograms.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &document)
                .context("Failed to write chromatograms")?;
            writeln!(writer)?;
        }
    }

    info!("{}", report.stats);
    Ok(())
}
