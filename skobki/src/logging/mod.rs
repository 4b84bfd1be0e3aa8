//! Process-wide logging
//!
//! The tokenizer reports through the `log_*!` macros. They do nothing until a
//! [`LoggingService`] is installed with [`init_global_logging`] or
//! [`init_global_logging_with_service`].

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Install a service built from the logging preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate().map_err(|e| format!("invalid logging configuration: {e}"))?;

    if let Some(code) = codes::lexical::ALL.into_iter().find(|code| code.metadata().is_none()) {
        return Err(format!("error code {code} has no registry entry"));
    }

    let service = Arc::new(LoggingService::from_preferences());
    init_global_logging_with_service(service.clone())?;
    service.log_event(
        LogEvent::success(codes::success::LOGGING_INITIALIZED, "Logging initialized")
            .with_context("profile", crate::config::build_info::profile()),
    );
    Ok(())
}

/// Install a caller-built service; tests use this with a [`MemoryLogger`]
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "global logger already installed".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(Arc::as_ref)
}

/// Send a prepared event to the global logger, if any
pub fn emit(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// One-line description of the logging setup
pub fn diagnostics() -> String {
    format!(
        "initialized={} {} ({})",
        is_initialized(),
        config::summary(),
        crate::config::build_info::source_info()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_without_logger_is_harmless() {
        // Another test may have installed the global logger; either way this must not panic
        emit(LogEvent::info("no sink").with_context("k", "v"));
        emit(LogEvent::error(codes::lexical::INVALID_ESCAPE, "no sink"));
    }

    #[test]
    fn test_diagnostics_line() {
        let line = diagnostics();
        assert!(line.starts_with("initialized="));
        assert!(line.contains("buffer="));
        assert!(line.contains(".toml"));
    }
}
