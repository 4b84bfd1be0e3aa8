//! Log events
//!
//! An event carries a level, a diagnostic [`Code`], an optional source span
//! and free-form key/value context. `Display` renders a single text line;
//! [`LogEvent::to_json`] renders the same event as one JSON object.

use super::codes::{plain, Code};
use crate::utils::Span;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    #[serde(rename = "WARN", alias = "WARNING")]
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts level names in any case, or their rank `0..=3`
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "0" => Ok(LogLevel::Error),
            "warn" | "warning" | "1" => Ok(LogLevel::Warning),
            "info" | "2" => Ok(LogLevel::Info),
            "debug" | "3" => Ok(LogLevel::Debug),
            other => Err(format!("unknown log level `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    /// Build an event, clipping the message to the configured maximum length
    pub fn new(level: LogLevel, code: Code, message: impl Into<String>) -> Self {
        let mut message = message.into();
        clip(&mut message, super::config::max_message_length());
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message,
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, code, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, plain::WARNING, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, plain::INFO, message)
    }

    /// Info-level event carrying a success code
    pub fn success(code: Code, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, code, message)
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, plain::DEBUG, message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.level, self.code, self.message)?;
        if let Some(span) = self.span {
            write!(f, " at {span}")?;
        }
        for (i, (key, value)) in self.context.iter().enumerate() {
            let sep = if i == 0 { " {" } else { ", " };
            write!(f, "{sep}{key}={value}")?;
        }
        if !self.context.is_empty() {
            f.write_str("}")?;
        }
        Ok(())
    }
}

fn clip(message: &mut String, max_len: usize) {
    if message.len() <= max_len {
        return;
    }
    let mut cut = max_len;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    message.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("ERROR".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("0".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!(" Warning ".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("3".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_line() {
        let event = LogEvent::error(codes::lexical::INVALID_ESCAPE, "Escape before plain byte")
            .with_span(Span::new(7, 1))
            .with_context("byte", "0x21")
            .with_context("after", "(");

        assert_eq!(
            event.to_string(),
            "[ERROR] E020 - Escape before plain byte at 7..8 {after=(, byte=0x21}"
        );
    }

    #[test]
    fn test_display_without_extras() {
        let event = LogEvent::success(codes::success::TOKENIZATION_COMPLETE, "Tokenized");
        assert_eq!(event.to_string(), "[INFO] I020 - Tokenized");
    }

    #[test]
    fn test_json_shape() {
        let event = LogEvent::error(codes::lexical::INVALID_DIRECTIVE, "Unknown keyword")
            .with_span(Span::new(0, 6))
            .with_context("keyword", "colors:");
        let value: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["code"], "E021");
        assert_eq!(value["span"]["start"], 0);
        assert_eq!(value["span"]["len"], 6);
        assert_eq!(value["context"]["keyword"], "colors:");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_json_skips_empty_fields() {
        let value: serde_json::Value =
            serde_json::from_str(&LogEvent::warning("overlap").to_json().unwrap()).unwrap();
        assert_eq!(value["level"], "WARN");
        assert!(value.get("span").is_none());
        assert!(value.get("context").is_none());
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        let mut message = "скобки".to_string();
        clip(&mut message, 3);
        assert_eq!(message, "с");

        let mut short = "ok".to_string();
        clip(&mut short, 10);
        assert_eq!(short, "ok");
    }
}
