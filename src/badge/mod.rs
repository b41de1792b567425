//! Status badge descriptor
//!
//! Written in the shields.io endpoint format:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "label": "dataset links",
//!   "message": "8/10 working",
//!   "color": "brightgreen"
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::policy::Verdict;
use crate::summary::RunSummary;

/// Endpoint schema version understood by the badge service
pub const BADGE_SCHEMA_VERSION: u32 = 1;

/// Badge color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    BrightGreen,
    Orange,
}

impl From<Verdict> for BadgeColor {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => BadgeColor::BrightGreen,
            Verdict::Fail => BadgeColor::Orange,
        }
    }
}

/// Badge descriptor; field order is the serialized key order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDescriptor {
    pub schema_version: u32,
    pub label: String,
    pub message: String,
    pub color: BadgeColor,
}

/// Badge write failures
#[derive(Debug, thiserror::Error)]
pub enum BadgeError {
    #[error("Failed to serialize badge: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write badge to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fill `{passing}` and `{total}` in a message template
pub fn render_message(template: &str, passing: usize, total: usize) -> String {
    template
        .replace("{passing}", &passing.to_string())
        .replace("{total}", &total.to_string())
}

impl BadgeDescriptor {
    /// Badge for a finished run; color comes from the verdict
    pub fn from_summary(
        summary: &RunSummary,
        verdict: Verdict,
        label: &str,
        message_template: &str,
    ) -> Self {
        Self {
            schema_version: BADGE_SCHEMA_VERSION,
            label: label.to_string(),
            message: render_message(message_template, summary.passing_count(), summary.total()),
            color: verdict.into(),
        }
    }

    /// Pretty JSON with a trailing newline
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self).map(|json| json + "\n")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Overwrite `path` with this badge, creating parent directories
    pub fn write_to_file(&self, path: &Path) -> Result<(), BadgeError> {
        let json = self.to_json()?;
        let write_err = |source: io::Error| BadgeError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, json).map_err(write_err)
    }
}
