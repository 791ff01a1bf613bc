//! Data transfer objects for the application layer.

mod run_report;

pub use run_report::RunReport;
