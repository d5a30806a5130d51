pub mod cli;
pub mod probe;

pub use cli::Args;
pub use probe::{report_error, run, write_report, OutputMode, ProbeOutcome};
