//! Run aggregation and reporting
//!
//! [`RunSummary`] accumulates probe outcomes during the pass, [`Reporter`]
//! renders the console report, and [`RunSummaryDocument`] is the optional
//! machine-readable summary (run_summary.json).

mod report;
mod run_summary;

pub use report::{percent, Reporter, START_BANNER};
pub use run_summary::{
    FailedRecord, RunSummary, RunSummaryDocument, RUN_SUMMARY_SCHEMA_ID,
    RUN_SUMMARY_SCHEMA_VERSION,
};
