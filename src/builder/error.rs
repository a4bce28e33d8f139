use crate::chromatogram::ConnectorError;

/// Errors that abort a chromatogram build.
///
/// None of these are transient: the run stops and no partial result is
/// returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// The scan sequence was empty
    #[error("no scans provided")]
    EmptyInput,

    /// Retention time decreased between two scans
    #[error("scan {scan_number} is out of order: retention time {retention_time} follows {previous_retention_time}")]
    OutOfOrderScans {
        /// Native scan number of the offending scan
        scan_number: i64,
        /// Its retention time
        retention_time: f64,
        /// Retention time of the preceding timed scan
        previous_retention_time: f64,
    },

    /// A scan being linked had no retention time
    #[error("scan {scan_number} has peaks to link but no retention time")]
    MissingRetentionTime {
        /// Native scan number of the offending scan
        scan_number: i64,
    },

    /// Neither the scan nor the method supplied an m/z tolerance
    #[error("no m/z tolerance available for scan {scan_number}")]
    NoToleranceAvailable {
        /// Native scan number of the offending scan
        scan_number: i64,
    },

    /// A scan violated the ingestion contract
    #[error("invalid scan {scan_number}: {reason}")]
    InvalidScan {
        /// Native scan number of the offending scan
        scan_number: i64,
        /// What was wrong with it
        reason: String,
    },

    /// Builder configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ConnectorError> for BuildError {
    fn from(error: ConnectorError) -> Self {
        match error {
            ConnectorError::MissingRetentionTime { scan_number } => {
                BuildError::MissingRetentionTime { scan_number }
            }
            ConnectorError::OutOfOrderScan {
                scan_number,
                retention_time,
                previous_retention_time,
            } => BuildError::OutOfOrderScans {
                scan_number,
                retention_time,
                previous_retention_time,
            },
        }
    }
}
