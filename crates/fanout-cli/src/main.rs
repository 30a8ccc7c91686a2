//! Fanout Binary
//!
//! Runs the degree feature pipeline over the working directory. Settings
//! come from `fanout.toml` when present, otherwise the built-in defaults.

use std::path::Path;
use std::process::ExitCode;

use fanout_core::{FanoutConfig, Pipeline};
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "fanout.toml";

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> fanout_core::Result<()> {
    let config = FanoutConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let report = Pipeline::new(config)?.run()?;

    tracing::info!(
        "All done! {} edges, {} nodes written to {}",
        report.summary.edges,
        report.rows_written,
        report.output.display()
    );
    Ok(())
}
