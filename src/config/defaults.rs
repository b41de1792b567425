//! Built-in defaults (layer 1)

use serde_json::{json, Value};

/// Config file picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "linkcheck.toml";

/// Catalog of dataset records
pub const DEFAULT_INPUT_PATH: &str = "datasets/datasets.csv";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

/// Failure ratio at or above which the run fails
pub const DEFAULT_FAIL_THRESHOLD: f64 = 0.30;

/// Client identification sent with every probe
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; dataset-link-checker/1.0)";

/// Badge descriptor output
pub const DEFAULT_BADGE_PATH: &str = "link-status.json";

pub const DEFAULT_BADGE_LABEL: &str = "dataset links";

pub const DEFAULT_BADGE_MESSAGE_TEMPLATE: &str = "{passing}/{total} working";

/// The defaults as a JSON layer for merging
pub fn builtin_layer() -> Value {
    json!({
        "input_path": DEFAULT_INPUT_PATH,
        "timeout_seconds": DEFAULT_TIMEOUT_SECONDS,
        "fail_threshold": DEFAULT_FAIL_THRESHOLD,
        "user_agent": DEFAULT_USER_AGENT,
        "badge_path": DEFAULT_BADGE_PATH,
        "badge_label": DEFAULT_BADGE_LABEL,
        "badge_message_template": DEFAULT_BADGE_MESSAGE_TEMPLATE,
    })
}
