//! Logging setup.
//!
//! Logs go to stderr so stdout stays clean for the report summary. `RUST_LOG`
//! takes precedence over the `--log-level` flag.

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, EXIT_INPUT};

pub fn init(log_level: &str) -> Result<(), AppError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|e| {
            AppError::new(EXIT_INPUT, format!("Invalid log level/filter '{log_level}': {e}"))
        })?,
    };

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    Ok(())
}
