/// Errors raised while linking a scan into the active traces
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectorError {
    /// A scan with peaks to link carried no retention time
    #[error("scan {scan_number} has peaks to link but no retention time")]
    MissingRetentionTime {
        /// Native scan number of the offending scan
        scan_number: i64,
    },

    /// A scan arrived with an earlier retention time than the one before it
    #[error(
        "scan {scan_number} has retention time {retention_time}, before the previous scan's {previous_retention_time}"
    )]
    OutOfOrderScan {
        /// Native scan number of the offending scan
        scan_number: i64,
        /// Retention time of the offending scan
        retention_time: f64,
        /// Retention time of the last scan accepted
        previous_retention_time: f64,
    },
}
