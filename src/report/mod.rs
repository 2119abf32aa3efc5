//! Reporting: per-file rows, run statistics and CSV output.

pub mod record;
pub mod stats;
pub mod writer;

pub use record::{HEADERS, ReportRow};
pub use stats::RunStatistics;
pub use writer::{write_csv, write_rows};
