//! Logging settings
//!
//! Buffer and message limits are compile-time constants from the build
//! profile. Output format and level come from [`LoggingPreferences`], which
//! can be installed once before the first event; otherwise they are read from
//! the environment on first use.

use super::events::LogLevel;
use crate::config::compile_time::logging::{
    LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH, SECURITY_MIN_LOG_LEVEL,
};
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

static PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install preferences; fails once any setting has been read
pub fn init_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    PREFERENCES
        .set(preferences)
        .map_err(|_| "logging preferences already in use".to_string())
}

pub fn preferences() -> &'static LoggingPreferences {
    PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn min_log_level() -> LogLevel {
    preferences().min_log_level
}

pub fn structured_output() -> bool {
    preferences().use_structured_logging
}

pub fn console_enabled() -> bool {
    preferences().enable_console_logging
}

/// Events at or above this severity pass regardless of `min_log_level`
pub fn security_floor() -> LogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => LogLevel::Error,
        1 => LogLevel::Warning,
        _ => LogLevel::Info,
    }
}

pub fn buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn max_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

pub fn validate() -> Result<(), String> {
    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("log buffer of {LOG_BUFFER_SIZE} events is below 100"));
    }
    if MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("max log message length is zero".to_string());
    }
    Ok(())
}

pub fn summary() -> String {
    let prefs = preferences();
    format!(
        "buffer={} max_message={} floor={} level={} structured={} console={}",
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
        security_floor(),
        prefs.min_log_level,
        prefs.use_structured_logging,
        prefs.enable_console_logging,
    )
}
