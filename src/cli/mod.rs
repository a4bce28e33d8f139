use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use mzxic::tolerance::MzTolerance;

mod build;
mod config;
mod demo;
mod input;
mod preset;

pub use config::BuilderOverrides;
pub use preset::Preset;

/// mzxic - Extracted-Ion Chromatogram Builder
#[derive(Parser)]
#[command(name = "mzxic")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Instrument preset selecting tolerance and thresholds.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum PresetArg {
    /// Library defaults
    #[default]
    Default,
    /// Orbitrap / FT-ICR
    HighResolution,
    /// Q-TOF
    TimeOfFlight,
    /// Unit-resolution instruments
    LowResolution,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Default => Preset::Default,
            PresetArg::HighResolution => Preset::HighResolution,
            PresetArg::TimeOfFlight => Preset::TimeOfFlight,
            PresetArg::LowResolution => Preset::LowResolution,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build chromatograms from a JSON scan list or CSV/TSV peak table
    Build {
        /// Input file (.json, .csv or .tsv)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output JSON file (defaults to stdout)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Instrument preset
        #[arg(short = 'p', long, default_value = "default", value_enum)]
        preset: PresetArg,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Minimum retention-time span of a kept run
        #[arg(long)]
        min_time_span: Option<f64>,

        /// Minimum apex intensity of an emitted chromatogram
        #[arg(long)]
        min_height: Option<f32>,

        /// Ignore peaks below this intensity
        #[arg(long)]
        noise_floor: Option<f32>,

        /// m/z tolerance in ppm (combined with --mz-tolerance when both are given)
        #[arg(long)]
        ppm: Option<f64>,

        /// Absolute m/z tolerance in Th
        #[arg(long)]
        mz_tolerance: Option<f64>,

        /// Only use scans of this MS level
        #[arg(long)]
        ms_level: Option<u8>,
    },

    /// Generate a mock LC-MS run and build chromatograms from it
    Demo {
        /// Optional JSON output file for the chromatograms
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Number of synthetic analytes
        #[arg(short = 'n', long, default_value = "25")]
        analytes: usize,

        /// Run length in seconds
        #[arg(short = 'd', long, default_value = "600")]
        duration: f64,

        /// Instrument preset
        #[arg(short = 'p', long, default_value = "time-of-flight", value_enum)]
        preset: PresetArg,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Tolerance from the `--ppm` / `--mz-tolerance` flags
fn tolerance_from_flags(ppm: Option<f64>, absolute: Option<f64>) -> Option<MzTolerance> {
    match (ppm, absolute) {
        (Some(ppm), Some(absolute)) => Some(MzTolerance::AbsoluteOrPpm { absolute, ppm }),
        (Some(ppm), None) => Some(MzTolerance::Ppm(ppm)),
        (None, Some(absolute)) => Some(MzTolerance::Absolute(absolute)),
        (None, None) => None,
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build {
            input,
            output,
            preset,
            config,
            min_time_span,
            min_height,
            noise_floor,
            ppm,
            mz_tolerance,
            ms_level,
        } => {
            let flags = BuilderOverrides {
                min_time_span,
                min_height,
                noise_floor,
                tolerance: tolerance_from_flags(ppm, mz_tolerance),
                ms_level,
                progress_interval: None,
            };
            build::run(input, output, Preset::from(preset), config, flags)
        }
        Commands::Demo {
            output,
            analytes,
            duration,
            preset,
        } => demo::run(output, analytes, duration, Preset::from(preset)),
    }
}
