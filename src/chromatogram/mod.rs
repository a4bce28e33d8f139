//! # Chromatogram Construction
//!
//! Streaming assembly of extracted-ion chromatograms (XICs) from scans that
//! arrive in retention-time order.
//!
//! ## Design
//!
//! 1. **Greedy linking**: within a scan, the most intense peaks are linked
//!    first so that a weak peak never claims a trace ahead of a stronger one.
//!
//! 2. **One point per scan**: a trace extended in the current scan cannot be
//!    extended again by a later, weaker peak.
//!
//! 3. **Segment commit**: a trace that misses a scan keeps its tail only if the
//!    tail already spans the minimum time; committed history is never lost.
//!
//! 4. **Deterministic order**: traces are kept in insertion order rather than
//!    in a hash set, so output order and ids are reproducible.

mod building;
mod connector;
mod error;
mod types;


pub use building::BuildingChromatogram;
pub use connector::{ConnectorStats, HighestDataPointConnector};
pub use error::ConnectorError;
pub use types::{Chromatogram, ChromatogramError};
