//! Logging bootstrap for the CLI.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
//! Messages are metadata-only `event=.. module=.. status=..` lines; note
//! values, passwords and keys are never logged.
//!
//! # Invariants
//! - Init is idempotent for the same level.
//! - Re-initialization with a different level is rejected.
//! - Init never panics.

use std::sync::Mutex;

use flexi_logger::{Logger, LoggerHandle};
use log::info;

use crate::errors::{NoteVaultError, Result};

/// Used when neither `--log-level` nor config sets a level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

static LOGGING_STATE: Mutex<Option<LoggingState>> = Mutex::new(None);

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

/// Start the stderr logger at `level`.
///
/// # Errors
/// - `ConfigError` when `level` is unsupported.
/// - `ConfigError` when logging is already active at another level.
pub fn init_logging(level: &str) -> Result<()> {
    let normalized = normalize_level(level)?;

    let mut state = LOGGING_STATE
        .lock()
        .map_err(|_| NoteVaultError::ConfigError("logging state lock poisoned".into()))?;

    if let Some(active) = state.as_ref() {
        if active.level != normalized {
            return Err(NoteVaultError::ConfigError(format!(
                "logging already initialized with level `{}`; refusing to switch to `{normalized}`",
                active.level
            )));
        }
        return Ok(());
    }

    let logger = Logger::try_with_str(normalized)
        .map_err(|e| NoteVaultError::ConfigError(format!("invalid log level `{normalized}`: {e}")))?
        .log_to_stderr()
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .map_err(|e| NoteVaultError::ConfigError(format!("failed to start logger: {e}")))?;

    info!(
        "event=logging_init module=logging status=ok level={normalized} version={}",
        env!("CARGO_PKG_VERSION")
    );

    *state = Some(LoggingState {
        level: normalized,
        _logger: logger,
    });
    Ok(())
}

/// The active level, or `None` before init.
pub fn logging_level() -> Option<&'static str> {
    LOGGING_STATE
        .lock()
        .ok()
        .and_then(|state| state.as_ref().map(|s| s.level))
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(NoteVaultError::ConfigError(format!(
            "unsupported log level `{other}`; expected off|trace|debug|info|warn|error"
        ))),
    }
}
