//! Runtime preferences
//!
//! Unlike the compile-time limits, these only change what the tokenizer
//! reports, never which tokens it produces. Defaults are read from
//! `SKOBKI_*` environment variables.

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Count tokens per kind in `LexicalMetrics`
    pub collect_detailed_metrics: bool,

    /// Keep the preamble consumed by bootstrap as a `Directive` token
    pub include_directive_token: bool,

    pub log_token_statistics: bool,

    /// Prefix error log messages with the failing byte offset
    pub include_offset_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_or(env_vars::LEXICAL_DETAILED_METRICS, true),
            include_directive_token: env_or(env_vars::LEXICAL_INCLUDE_DIRECTIVE_TOKEN, false),
            log_token_statistics: env_or(env_vars::LEXICAL_LOG_TOKEN_STATS, false),
            include_offset_in_errors: env_or(env_vars::LEXICAL_INCLUDE_OFFSETS, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Off means events go to an in-memory buffer
    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_or(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_or(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env_or(env_vars::LOGGING_MIN_LEVEL, LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

/// Parsed value of `name`, or `default` when unset or unparsable
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

pub mod env_vars {
    pub const LEXICAL_DETAILED_METRICS: &str = "SKOBKI_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_INCLUDE_DIRECTIVE_TOKEN: &str = "SKOBKI_LEXICAL_INCLUDE_DIRECTIVE_TOKEN";
    pub const LEXICAL_LOG_TOKEN_STATS: &str = "SKOBKI_LEXICAL_LOG_TOKEN_STATS";
    pub const LEXICAL_INCLUDE_OFFSETS: &str = "SKOBKI_LEXICAL_INCLUDE_OFFSETS";

    pub const LOGGING_USE_STRUCTURED: &str = "SKOBKI_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SKOBKI_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SKOBKI_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_unset() {
        assert!(env_or("SKOBKI_TEST_UNSET_FLAG", true));
        assert_eq!(env_or("SKOBKI_TEST_UNSET_LEVEL", LogLevel::Warning), LogLevel::Warning);
    }

    #[test]
    fn test_runtime_config_roundtrips_through_json() {
        let config = RuntimeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_log_level_serializes_by_name() {
        let prefs = LoggingPreferences {
            use_structured_logging: true,
            enable_console_logging: false,
            min_log_level: LogLevel::Warning,
        };
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["min_log_level"], "WARN");
    }
}
