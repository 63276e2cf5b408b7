//! Structured logging for tracing Task combinators.
//!
//! Log levels:
//! - ERROR: Failures in the ambient layers (config, log file)
//! - WARN: Unexpected conditions that are recoverable
//! - INFO: Initialization and configuration changes
//! - DEBUG: Discarded operands and caught rejections
//! - TRACE: Settle points inside combinators (race winners, fail-fast in `ap`)
//!
//! Nothing is written until [`init`] or [`init_with_config`] sets a log file.
//! Debug level can be forced with the `FPKIT_DEBUG=1` env var.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::Error;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Log levels for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(Error::Validation(format!("unknown log level: {}", other))),
        }
    }
}

fn env_debug() -> bool {
    std::env::var("FPKIT_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Initialize logging to the given file at the given level.
///
/// The file is truncated. The path can only be set once per process;
/// later calls only change the level. Fails, leaving logging off, when
/// the file cannot be created.
pub fn init(path: PathBuf, level: LogLevel) -> Result<(), Error> {
    let level = if env_debug() && level < LogLevel::Debug {
        LogLevel::Debug
    } else {
        level
    };
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);

    if LOG_PATH.get().is_some() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, "")?;
    LOG_PATH.set(path).ok();
    Ok(())
}

/// Initialize logging from a loaded [`Config`].
///
/// Only the level is applied when the config has no `log_file`.
pub fn init_with_config(config: &Config) -> Result<(), Error> {
    match config.log_path() {
        Some(path) => init(path, config.log_level),
        None => {
            set_level(config.log_level);
            Ok(())
        }
    }
}

/// Whether a log file has been set.
pub fn is_active() -> bool {
    LOG_PATH.get().is_some()
}

/// Set the minimum log level for output.
pub fn set_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Get the current log level.
pub fn get_level() -> LogLevel {
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Whether a message at `level` would be written.
pub fn enabled(level: LogLevel) -> bool {
    is_active() && level <= get_level()
}

/// Log a message at the specified level.
pub fn log_at(level: LogLevel, msg: &str) {
    if level > get_level() {
        return;
    }

    if let Some(path) = LOG_PATH.get() {
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] [{}] {}", timestamp, level.as_str(), msg);
        }
    }
}

/// Log a message at INFO level.
pub fn info(msg: &str) {
    log_at(LogLevel::Info, msg);
}

/// Log a message at ERROR level.
pub fn error(msg: &str) {
    log_at(LogLevel::Error, msg);
}

/// Log a message at WARN level.
pub fn warn(msg: &str) {
    log_at(LogLevel::Warn, msg);
}

/// Log a message at DEBUG level.
pub fn debug(msg: &str) {
    log_at(LogLevel::Debug, msg);
}

/// Log a message at TRACE level.
pub fn trace(msg: &str) {
    log_at(LogLevel::Trace, msg);
}

/// Log macro for INFO level.
#[macro_export]
macro_rules! fplog {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Info) {
            $crate::log::info(&format!($($arg)*))
        }
    };
}

/// Log macro for ERROR level.
#[macro_export]
macro_rules! fplog_error {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Error) {
            $crate::log::error(&format!($($arg)*))
        }
    };
}

/// Log macro for WARN level.
#[macro_export]
macro_rules! fplog_warn {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Warn) {
            $crate::log::warn(&format!($($arg)*))
        }
    };
}

/// Log macro for DEBUG level.
#[macro_export]
macro_rules! fplog_debug {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Debug) {
            $crate::log::debug(&format!($($arg)*))
        }
    };
}

/// Log macro for TRACE level (combinator settle points).
#[macro_export]
macro_rules! fplog_trace {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Trace) {
            $crate::log::trace(&format!($($arg)*))
        }
    };
}
