//! Running totals and the run_summary.json document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::catalog::DatasetRecord;
use crate::policy::Verdict;
use crate::probe::ProbeOutcome;

/// Schema version for run_summary.json
pub const RUN_SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Schema identifier for run_summary.json
pub const RUN_SUMMARY_SCHEMA_ID: &str = "dataset-link-check/run_summary@1";

/// A record that failed its probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRecord {
    pub name: String,
    pub url: String,
    /// Status code or transport fault description
    pub reason: String,
}

/// Totals for one pass over the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    total: usize,
    failed: Vec<FailedRecord>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one probed record
    pub fn record(&mut self, record: &DatasetRecord, outcome: &ProbeOutcome) {
        self.total += 1;
        if !outcome.is_ok() {
            self.failed.push(FailedRecord {
                name: record.name.clone(),
                url: record.url.clone(),
                reason: outcome.reason(),
            });
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Failures in the order they were encountered
    pub fn failed(&self) -> &[FailedRecord] {
        &self.failed
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn passing_count(&self) -> usize {
        self.total - self.failed.len()
    }

    /// Fraction of records that failed; 0 for an empty run
    pub fn failure_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failed.len() as f64 / self.total as f64
        }
    }
}

/// Machine-readable run summary (run_summary.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummaryDocument {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When the summary was created
    pub checked_at: DateTime<Utc>,

    /// SHA-256 of the catalog that was checked
    pub catalog_digest: String,

    pub total: usize,

    pub passing: usize,

    pub failed_count: usize,

    pub failure_ratio: f64,

    pub fail_threshold: f64,

    pub verdict: Verdict,

    /// Failed records in encounter order
    pub failures: Vec<FailedRecord>,
}

impl RunSummaryDocument {
    pub fn new(
        summary: &RunSummary,
        catalog_digest: String,
        fail_threshold: f64,
        verdict: Verdict,
    ) -> Self {
        Self {
            schema_version: RUN_SUMMARY_SCHEMA_VERSION,
            schema_id: RUN_SUMMARY_SCHEMA_ID.to_string(),
            checked_at: Utc::now(),
            catalog_digest,
            total: summary.total(),
            passing: summary.passing_count(),
            failed_count: summary.failed_count(),
            failure_ratio: summary.failure_ratio(),
            fail_threshold,
            verdict,
            failures: summary.failed().to_vec(),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json + "\n")
    }
}
