#![no_main]

use libfuzzer_sys::fuzz_target;
use mzxic::builder::{BuilderConfig, ChromatogramBuilder};
use mzxic::scan::Scan;
use mzxic::tolerance::MzTolerance;

fuzz_target!(|data: &[u8]| {
    // Interpret the input as a JSON scan list; anything unparsable is fine
    let Ok(scans) = serde_json::from_slice::<Vec<Scan>>(data) else {
        return;
    };

    let config = BuilderConfig {
        min_time_span: 1.0,
        default_tolerance: Some(MzTolerance::Ppm(20.0)),
        ..Default::default()
    };

    // Malformed scans must be rejected with an error, never a panic
    let _ = ChromatogramBuilder::new(config).build(&scans);
});
