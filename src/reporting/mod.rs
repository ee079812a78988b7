//! Scan event reporting and summary output

pub mod reporter;
pub mod report_writer;

pub use reporter::{ProgressReporter, ScanEvent, ScanReporter, TracingReporter};
pub use report_writer::write_summary;
