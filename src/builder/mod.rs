//! # Chromatogram Builder
//!
//! Orchestrates a full run: validates the scan sequence, resolves the m/z
//! tolerance per scan, feeds the connector one scan at a time and returns the
//! finished chromatograms.
//!
//! Runs are synchronous. The only interruption point is a cooperative
//! cancellation check before each scan; a canceled run yields no result.

mod builder_impl;
mod config;
mod error;
mod progress;
mod stats;


pub use builder_impl::{BuildReport, ChromatogramBuilder};
pub use config::BuilderConfig;
pub use error::BuildError;
pub use progress::{CancellationToken, ProgressTracker};
pub use stats::BuildStats;
