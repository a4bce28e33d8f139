//! # mzxic - Extracted-Ion Chromatogram Construction
//!
//! `mzxic` turns a retention-time ordered sequence of centroided mass spectra
//! into extracted-ion chromatograms (XICs): traces of a single ion's intensity
//! over time. It is the step every downstream feature-detection and
//! quantitation stage depends on.
//!
//! ## Key Features
//!
//! - **Streaming**: scans are consumed one at a time; only the traces under
//!   construction are held in memory.
//!
//! - **Greedy Highest-Point Linking**: the most intense peaks of each scan are
//!   linked first, each trace accepts at most one point per scan.
//!
//! - **Segment Commit Policy**: gaps commit a trace's tail when it already
//!   spans the minimum time, and discard it otherwise without ever touching
//!   committed history.
//!
//! - **Deterministic Output**: identical input produces identical
//!   chromatograms in identical order.
//!
//! - **Cooperative Cancellation**: long runs can be stopped between scans from
//!   another thread; progress can be polled the same way.
//!
//! ## Quick Start
//!
//! ```rust
//! use mzxic::builder::{BuilderConfig, ChromatogramBuilder};
//! use mzxic::scan::ScanBuilder;
//! use mzxic::tolerance::MzTolerance;
//!
//! let scans: Vec<_> = [10.0_f32, 20.0, 5.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &intensity)| {
//!         ScanBuilder::new(i as i64 + 1)
//!             .retention_time(i as f64)
//!             .add_peak(100.0, intensity)
//!             .build()
//!     })
//!     .collect();
//!
//! let config = BuilderConfig {
//!     min_time_span: 1.5,
//!     min_height: 8.0,
//!     default_tolerance: Some(MzTolerance::Absolute(0.01)),
//!     ..Default::default()
//! };
//!
//! let report = ChromatogramBuilder::new(config)
//!     .build(&scans)?
//!     .expect("not canceled");
//!
//! assert_eq!(report.chromatograms.len(), 1);
//! assert_eq!(report.chromatograms[0].height(), 20.0);
//! # Ok::<(), mzxic::builder::BuildError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`tolerance`]: m/z tolerance windows
//! - [`scan`]: scan input types, ingestion contract and scan selection
//! - [`chromatogram`]: trace accumulator, highest-data-point connector and the
//!   immutable output chromatogram
//! - [`builder`]: run orchestration, configuration, cancellation and progress

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod chromatogram;
pub mod scan;
pub mod tolerance;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::builder::{
        BuildError, BuildReport, BuildStats, BuilderConfig, CancellationToken,
        ChromatogramBuilder, ProgressTracker,
    };
    pub use crate::chromatogram::{
        BuildingChromatogram, Chromatogram, ChromatogramError, ConnectorError, ConnectorStats,
        HighestDataPointConnector,
    };
    pub use crate::scan::{PeakArrays, RtRange, Scan, ScanBuilder, ScanSelection};
    pub use crate::tolerance::{MzRange, MzTolerance};
}
