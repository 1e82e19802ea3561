//! Logging bootstrap.
//!
//! The core only talks to the `log` facade. Binaries call [`init`] once to
//! route records to stderr through `flexi_logger`, so diagnostics never mix
//! with the prompts on stdout.

use crate::error::{Result, RolodexError};
use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

pub const LOG_ENV: &str = "ROLODEX_LOG";

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Start logging at `level` unless `ROLODEX_LOG` says otherwise.
///
/// Calling this again after a successful start is a no-op.
pub fn init(level: &str) -> Result<()> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let level = match std::env::var(LOG_ENV) {
        Ok(from_env) if !from_env.trim().is_empty() => normalize_level(&from_env)?,
        _ => normalize_level(level)?,
    };

    LOGGER
        .get_or_try_init(|| {
            Logger::try_with_str(level)
                .and_then(|logger| logger.log_to_stderr().start())
                .map_err(|e| RolodexError::Config(format!("failed to start logger: {}", e)))
        })
        .map(|_| ())
}

pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(RolodexError::Config(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error|off",
            other
        ))),
    }
}
