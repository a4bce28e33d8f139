//! Scan input for the command-line tool.
//!
//! Two layouts are accepted:
//!
//! - **JSON**: an array of scan objects as produced by `serde_json` from
//!   [`Scan`].
//! - **CSV/TSV peak table** (long format, one row per peak):
//!
//! ```text
//! scan_number,retention_time,mz,intensity,ms_level
//! 1,0.0,100.0004,1500.0,1
//! 1,0.0,250.1201,820.0,1
//! 2,0.5,100.0003,1720.0,1
//! ```
//!
//! Consecutive rows with the same scan number form one scan; they must agree
//! on retention time and MS level, and a scan number may not reappear after
//! another scan has started. An empty
//! `retention_time` cell yields a scan without retention time; `ms_level` may
//! be omitted and defaults to 1.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use mzxic::scan::{PeakArrays, Scan};

/// One row of the long-format peak table
#[derive(Debug, Deserialize)]
struct PeakRow {
    scan_number: i64,
    retention_time: Option<f64>,
    mz: f64,
    intensity: f32,
    #[serde(default)]
    ms_level: Option<u8>,
}

/// Read scans from a JSON or CSV/TSV file, chosen by extension
pub fn read_scans(path: &Path) -> Result<Vec<Scan>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    match extension.as_str() {
        "json" => read_json(reader),
        "csv" => read_peak_table(reader, b','),
        "tsv" | "txt" => read_peak_table(reader, b'\t'),
        other => bail!(
            "Unsupported input extension '{}' (expected .json, .csv or .tsv)",
            other
        ),
    }
}

fn read_json<R: Read>(reader: R) -> Result<Vec<Scan>> {
    serde_json::from_reader(reader).context("Failed to parse JSON scan list")
}

/// Group long-format peak rows into scans, preserving row order
pub fn read_peak_table<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Scan>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut scans: Vec<Scan> = Vec::new();
    let mut seen: HashSet<i64> = HashSet::new();
    for (line, row) in csv_reader.deserialize::<PeakRow>().enumerate() {
        let row_number = line + 2;
        let row = row.with_context(|| format!("Invalid peak table row {}", row_number))?;

        let current = scans
            .last_mut()
            .filter(|scan| scan.scan_number == row.scan_number);
        match current {
            Some(scan) => {
                if scan.retention_time != row.retention_time {
                    bail!(
                        "Row {}: scan {} has retention time {:?}, earlier rows of the scan have {:?}",
                        row_number,
                        row.scan_number,
                        row.retention_time,
                        scan.retention_time
                    );
                }
                if let Some(level) = row.ms_level {
                    if level != scan.ms_level {
                        bail!(
                            "Row {}: scan {} has ms_level {}, earlier rows of the scan have {}",
                            row_number,
                            row.scan_number,
                            level,
                            scan.ms_level
                        );
                    }
                }
                scan.peaks.push(row.mz, row.intensity);
            }
            None => {
                if !seen.insert(row.scan_number) {
                    bail!(
                        "Row {}: rows of scan {} are not contiguous",
                        row_number,
                        row.scan_number
                    );
                }
                let mut scan =
                    Scan::new(row.scan_number, row.retention_time, PeakArrays::default());
                scan.ms_level = row.ms_level.unwrap_or(1);
                scan.peaks.push(row.mz, row.intensity);
                scans.push(scan);
            }
        }
    }

    Ok(scans)
}
