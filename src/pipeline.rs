//! Check pipeline
//!
//! One sequential pass over the catalog:
//! - Open the catalog (header errors abort before any probe)
//! - Probe each record in file order and report it
//! - Print the summary block
//! - Write the badge, then the optional run summary
//!
//! The caller turns the returned verdict into the exit code.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::badge::{BadgeDescriptor, BadgeError};
use crate::catalog::{Catalog, CatalogError};
use crate::config::CheckerConfig;
use crate::policy::{self, ExitCode, Verdict};
use crate::probe::{probe, HttpTransport};
use crate::summary::{Reporter, RunSummary, RunSummaryDocument};

/// Errors that end a run early
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("badge error: {0}")]
    Badge(#[from] BadgeError),

    #[error("failed to write report: {0}")]
    Report(#[source] io::Error),

    #[error("failed to write run summary to {}: {source}", .path.display())]
    Summary {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub verdict: Verdict,
    pub badge: BadgeDescriptor,
}

impl RunReport {
    pub fn exit_code(&self) -> ExitCode {
        self.verdict.exit_code()
    }
}

/// Run the full check, writing the console report to `out`
pub fn run_check<T, W>(
    config: &CheckerConfig,
    transport: &T,
    out: W,
) -> Result<RunReport, PipelineError>
where
    T: HttpTransport + ?Sized,
    W: Write,
{
    let catalog = Catalog::open(&config.input_path)?;
    info!(path = %config.input_path.display(), "catalog loaded");

    let mut reporter = Reporter::new(out);
    let mut summary = RunSummary::new();
    reporter.start().map_err(PipelineError::Report)?;

    for record in catalog.records() {
        let record = record?;
        let outcome = probe(transport, &record.url);
        if !outcome.is_ok() {
            warn!(name = %record.name, url = %record.url, reason = %outcome, "link unavailable");
        }

        reporter
            .record(&record, &outcome)
            .map_err(PipelineError::Report)?;
        summary.record(&record, &outcome);
    }

    let verdict = policy::evaluate(summary.failure_ratio(), config.fail_threshold);
    reporter
        .summary(&summary, config.fail_threshold, verdict)
        .map_err(PipelineError::Report)?;

    let badge = BadgeDescriptor::from_summary(
        &summary,
        verdict,
        &config.badge_label,
        &config.badge_message_template,
    );
    badge.write_to_file(&config.badge_path)?;
    info!(path = %config.badge_path.display(), message = %badge.message, "badge written");

    if let Some(path) = &config.summary_path {
        RunSummaryDocument::new(&summary, catalog.digest(), config.fail_threshold, verdict)
            .write_to_file(path)
            .map_err(|source| PipelineError::Summary {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "run summary written");
    }

    info!(
        total = summary.total(),
        failed = summary.failed_count(),
        verdict = ?verdict,
        "check finished"
    );

    Ok(RunReport {
        summary,
        verdict,
        badge,
    })
}
