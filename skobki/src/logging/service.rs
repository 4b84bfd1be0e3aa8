//! Logging service and sinks

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Destination for accepted events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of a [`Logger`]
pub struct LoggingService {
    sink: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(sink: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }

    /// Sink and level chosen from the logging preferences. Without console
    /// output, events are kept in a bounded [`MemoryLogger`].
    pub fn from_preferences() -> Self {
        let sink: Arc<dyn Logger> = match (config::console_enabled(), config::structured_output()) {
            (false, _) => Arc::new(MemoryLogger::new()),
            (true, true) => Arc::new(StructuredLogger),
            (true, false) => Arc::new(ConsoleLogger),
        };
        Self::new(sink, config::min_log_level())
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether an event at `level` reaches the sink
    pub fn accepts(&self, level: LogLevel) -> bool {
        level <= self.min_level.max(config::security_floor())
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.accepts(event.level) {
            self.sink.log(&event);
        }
    }
}

/// Text lines; errors and warnings on stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        write_line(event.level, &event.to_string());
    }
}

/// One JSON object per line
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        let line = event.to_json().unwrap_or_else(|_| event.to_string());
        write_line(event.level, &line);
    }
}

fn write_line(level: LogLevel, line: &str) {
    if level <= LogLevel::Warning {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Keeps the most recent events, dropping the oldest once full
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::with_capacity(config::buffer_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<LogEvent> {
        self.events().into_iter().filter(LogEvent::is_error).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    pub fn has_error(&self, code: Code) -> bool {
        self.contains(LogLevel::Error, code)
    }

    pub fn has_success(&self, code: Code) -> bool {
        self.contains(LogLevel::Info, code)
    }

    fn contains(&self, level: LogLevel, code: Code) -> bool {
        self.events
            .lock()
            .map(|events| events.iter().any(|e| e.level == level && e.code == code))
            .unwrap_or(false)
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            if events.len() == self.capacity {
                events.pop_front();
            }
            events.push_back(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::Span;

    #[test]
    fn test_memory_logger_queries() {
        let logger = MemoryLogger::with_capacity(8);
        logger.log(&LogEvent::info("bootstrap skipped"));
        logger.log(&LogEvent::error(codes::lexical::INVALID_ESCAPE, "Escape at end of input"));
        logger.log(&LogEvent::success(codes::success::DIRECTIVES_APPLIED, "Preamble applied"));

        assert_eq!(logger.len(), 3);
        assert_eq!(logger.errors().len(), 1);
        assert!(logger.has_error(codes::lexical::INVALID_ESCAPE));
        assert!(!logger.has_error(codes::lexical::INVALID_DIRECTIVE));
        assert!(logger.has_success(codes::success::DIRECTIVES_APPLIED));

        logger.clear();
        assert!(logger.is_empty());
    }

    #[test]
    fn test_memory_logger_drops_oldest() {
        let logger = MemoryLogger::with_capacity(2);
        for offset in 0..3 {
            logger.log(
                &LogEvent::error(codes::lexical::INVALID_ESCAPE, "Invalid escape")
                    .with_span(Span::single(offset)),
            );
        }

        let spans: Vec<_> = logger.events().iter().filter_map(|e| e.span).collect();
        assert_eq!(spans, vec![Span::single(1), Span::single(2)]);
    }

    #[test]
    fn test_service_passes_everything_at_debug() {
        let sink = Arc::new(MemoryLogger::with_capacity(16));
        let service = LoggingService::new(sink.clone(), LogLevel::Debug);

        service.log_event(LogEvent::error(codes::lexical::NOT_IMPLEMENTED, "Nested directive"));
        service.log_event(LogEvent::success(codes::success::TOKENIZATION_COMPLETE, "Done"));
        service.log_event(LogEvent::debug("text run of 5 bytes"));

        assert_eq!(sink.len(), 3);
        assert!(sink.has_error(codes::lexical::NOT_IMPLEMENTED));
    }

    #[test]
    fn test_service_filters_below_level() {
        let sink = Arc::new(MemoryLogger::with_capacity(16));
        let service = LoggingService::new(sink.clone(), LogLevel::Error);

        service.log_event(LogEvent::debug("text run"));
        service.log_event(LogEvent::info("tokens: 5"));
        service.log_event(LogEvent::error(codes::lexical::INVALID_INPUT_RANGE, "View out of range"));

        assert!(!service.accepts(LogLevel::Debug));
        assert_eq!(sink.len(), 1);
        assert!(sink.has_error(codes::lexical::INVALID_INPUT_RANGE));
    }

    #[test]
    fn test_console_sinks_write_without_panicking() {
        let event = LogEvent::error(codes::lexical::TOO_MANY_TOKENS, "Token limit exceeded")
            .with_context("limit", 10);
        ConsoleLogger.log(&event);
        StructuredLogger.log(&event);
    }
}
