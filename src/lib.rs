//! Dataset link integrity checker
//!
//! Reads a CSV catalog of datasets, probes each record's `MAIN_LINK`,
//! prints a report, writes a status badge descriptor and decides
//! pass/fail against a failure-ratio threshold.

pub mod badge;
pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod policy;
pub mod probe;
pub mod summary;

pub use badge::{BadgeColor, BadgeDescriptor, BadgeError};
pub use catalog::{Catalog, CatalogError, DatasetRecord};
pub use config::{CheckerConfig, ConfigError};
pub use pipeline::{run_check, PipelineError, RunReport};
pub use policy::{evaluate, ExitCode, Verdict};
pub use probe::{probe, HttpTransport, ProbeOutcome, ReqwestTransport, TransportFault};
pub use summary::{FailedRecord, Reporter, RunSummary};
