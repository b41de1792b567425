//! Console report

use std::io::{self, Write};

use super::run_summary::RunSummary;
use crate::catalog::DatasetRecord;
use crate::policy::Verdict;
use crate::probe::ProbeOutcome;

pub const START_BANNER: &str = "Starting dataset link integrity check...";

/// Ratio as a whole percentage, ties rounded to even (12.5 -> 12)
pub fn percent(ratio: f64) -> u64 {
    (ratio * 100.0).round_ties_even() as u64
}

/// Writes the human-readable report line by line
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn start(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", START_BANNER)?;
        writeln!(self.out)
    }

    /// One line per probed record
    pub fn record(&mut self, record: &DatasetRecord, outcome: &ProbeOutcome) -> io::Result<()> {
        if outcome.is_ok() {
            writeln!(self.out, "{}: OK ({})", record.name, outcome)
        } else {
            writeln!(self.out, "{}: No Longer Available ({})", record.name, outcome)
        }
    }

    /// Summary block, failure listing and the closing verdict line
    pub fn summary(
        &mut self,
        summary: &RunSummary,
        fail_threshold: f64,
        verdict: Verdict,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- SUMMARY ---")?;
        writeln!(self.out, "Total links checked: {}", summary.total())?;
        writeln!(
            self.out,
            "Broken links: {} ({}%)",
            summary.failed_count(),
            percent(summary.failure_ratio())
        )?;

        if !summary.failed().is_empty() {
            writeln!(self.out)?;
            for failed in summary.failed() {
                writeln!(self.out, " - {} → {} ({})", failed.name, failed.url, failed.reason)?;
            }
        }

        writeln!(self.out)?;
        match verdict {
            Verdict::Pass => writeln!(self.out, "SUCCESS: Check completed successfully.")?,
            Verdict::Fail => writeln!(
                self.out,
                "FAILURE: Broken links exceed {}% threshold",
                percent(fail_threshold)
            )?,
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> DatasetRecord {
        DatasetRecord {
            name: name.to_string(),
            url: format!("https://{}.example/data", name.to_lowercase()),
        }
    }

    fn render(f: impl FnOnce(&mut Reporter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut reporter = Reporter::new(Vec::new());
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(0.2), 20);
        assert_eq!(percent(1.0 / 3.0), 33);
        assert_eq!(percent(2.0 / 3.0), 67);
        assert_eq!(percent(0.30), 30);
        assert_eq!(percent(0.125), 12);
        assert_eq!(percent(0.625), 62);
        assert_eq!(percent(0.375), 38);
        assert_eq!(percent(1.0), 100);
    }

    #[test]
    fn test_record_lines() {
        let out = render(|r| {
            r.record(&record("Iris"), &ProbeOutcome::Ok(200))?;
            r.record(&record("MNIST"), &ProbeOutcome::FailedStatus(404))?;
            r.record(
                &record("Wiki"),
                &ProbeOutcome::FailedTransport("timed out: deadline".to_string()),
            )
        });

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Iris: OK (200)");
        assert_eq!(lines[1], "MNIST: No Longer Available (404)");
        assert_eq!(lines[2], "Wiki: No Longer Available (timed out: deadline)");
    }

    #[test]
    fn test_start_banner() {
        let out = render(|r| r.start());
        assert!(out.starts_with(START_BANNER));
    }

    #[test]
    fn test_summary_block_passing() {
        let mut summary = RunSummary::new();
        for i in 0..8 {
            summary.record(&record(&format!("ok{}", i)), &ProbeOutcome::Ok(200));
        }
        summary.record(&record("Gone"), &ProbeOutcome::FailedStatus(404));
        summary.record(&record("Down"), &ProbeOutcome::FailedStatus(503));

        let out = render(|r| r.summary(&summary, 0.30, Verdict::Pass));

        assert!(out.contains("--- SUMMARY ---"));
        assert!(out.contains("Total links checked: 10"));
        assert!(out.contains("Broken links: 2 (20%)"));
        let gone = out.find(" - Gone → https://gone.example/data (404)").unwrap();
        let down = out.find(" - Down → https://down.example/data (503)").unwrap();
        assert!(gone < down);
        assert!(out.trim_end().ends_with("SUCCESS: Check completed successfully."));
    }

    #[test]
    fn test_summary_block_failing() {
        let mut summary = RunSummary::new();
        summary.record(&record("A"), &ProbeOutcome::FailedStatus(500));

        let out = render(|r| r.summary(&summary, 0.30, Verdict::Fail));

        assert!(out.contains("Broken links: 1 (100%)"));
        assert!(out.contains("FAILURE: Broken links exceed 30% threshold"));
    }

    #[test]
    fn test_summary_block_empty_run() {
        let out = render(|r| r.summary(&RunSummary::new(), 0.30, Verdict::Pass));

        assert!(out.contains("Total links checked: 0"));
        assert!(out.contains("Broken links: 0 (0%)"));
        assert!(!out.contains(" - "));
    }
}
