//! Log output for the batch runner.

use tracing_subscriber::EnvFilter;

use crate::error::{EngineError, EngineResult};

/// Installs a compact fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` is used as the filter
/// (e.g. `info` or `leave_engine=debug`). Fails if the filter does not parse
/// or a global subscriber is already installed.
pub fn init(log_level: &str) -> EngineResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|e| EngineError::TelemetryError {
            message: format!("invalid log filter '{}': {}", log_level, e),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| EngineError::TelemetryError {
            message: e.to_string(),
        })
}
