//! # mzxic
//!
//! A command-line tool for building extracted-ion chromatograms from
//! centroided LC-MS scans.
//!
//! ## Supported Input Formats
//!
//! - **JSON**: array of scan objects
//! - **CSV/TSV**: long-format peak table (`scan_number,retention_time,mz,intensity[,ms_level]`)
//! - **Demo**: generate a mock LC-MS run
//!
//! ## Usage
//!
//! ```bash
//! # Build chromatograms from a peak table
//! mzxic build peaks.csv chromatograms.json --preset high-resolution
//!
//! # Run the demo
//! mzxic demo -n 25
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
