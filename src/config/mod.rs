//! Checker configuration
//!
//! Resolves the effective configuration from three layers:
//! 1. Built-in defaults
//! 2. Config file (`linkcheck.toml`, optional unless named explicitly)
//! 3. CLI flags

mod checker;
mod defaults;
mod merge;

pub use checker::{CheckerConfig, ConfigError};
pub use defaults::{
    builtin_layer, DEFAULT_BADGE_LABEL, DEFAULT_BADGE_MESSAGE_TEMPLATE, DEFAULT_BADGE_PATH,
    DEFAULT_CONFIG_FILE, DEFAULT_FAIL_THRESHOLD, DEFAULT_INPUT_PATH, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT,
};
pub use merge::{merge_layers, overlay};
