//! Dataset link check CLI
//!
//! Entry point for the `dataset-link-check` command-line tool.

use clap::Parser;
use dataset_link_check::{run_check, CheckerConfig, ExitCode, ReqwestTransport};
use serde_json::json;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dataset-link-check")]
#[command(about = "Check that every dataset link in a catalog is still reachable", version)]
struct Cli {
    /// Path to config file (default: linkcheck.toml, if present)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// CSV catalog with NAME and MAIN_LINK columns
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, short = 't')]
    timeout: Option<u64>,

    /// Failure ratio (0-1] at or above which the check fails
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<f64>,

    /// Badge descriptor output path
    #[arg(long, short = 'b')]
    badge: Option<PathBuf>,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// User-Agent sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

/// Finite number only; NaN and infinities would vanish from the JSON layer
fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|e| format!("invalid threshold '{}': {}", value, e))?;
    if !threshold.is_finite() {
        return Err(format!("threshold must be a finite number, got '{}'", value));
    }
    Ok(threshold)
}

impl Cli {
    /// Flags as the highest-precedence config layer; unset flags are null
    fn overrides(&self) -> serde_json::Value {
        json!({
            "input_path": self.input,
            "timeout_seconds": self.timeout,
            "fail_threshold": self.threshold,
            "badge_path": self.badge,
            "summary_path": self.summary_json,
            "user_agent": self.user_agent,
        })
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match CheckerConfig::load(cli.config.as_deref(), cli.overrides()) {
        Ok(c) => c,
        Err(e) => exit_with_error(&e),
    };

    let transport = match ReqwestTransport::new(&config.user_agent, config.timeout()) {
        Ok(t) => t,
        Err(e) => exit_with_error(&e),
    };

    let stdout = io::stdout();
    match run_check(&config, &transport, stdout.lock()) {
        Ok(report) => process::exit(report.exit_code().as_i32()),
        Err(e) => exit_with_error(&e),
    }
}

fn exit_with_error(err: &dyn std::error::Error) -> ! {
    eprintln!("Error: {}", err);
    process::exit(ExitCode::Failure.as_i32());
}
