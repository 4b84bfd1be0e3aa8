//! Logging macros
//!
//! Context values are anything implementing `Display`. Nothing is formatted
//! unless a global logger is installed and accepts the event's level.

#[doc(hidden)]
#[macro_export]
macro_rules! __emit_event {
    ($level:expr, $event:expr $(, span = $span:expr)? $(; $key:expr => $value:expr)*) => {
        if let Some(logger) = $crate::logging::try_get_global_logger() {
            if logger.accepts($level) {
                #[allow(unused_mut)]
                let mut event = $event;
                $( event = event.with_span($span); )?
                $( event = event.with_context($key, &$value); )*
                logger.log_event(event);
            }
        }
    };
}

/// Error event with a diagnostic code, an optional span, then `key => value` context
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::__emit_event!($crate::logging::LogLevel::Error,
            $crate::logging::LogEvent::error($code, $message))
    };
    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::__emit_event!($crate::logging::LogLevel::Error,
            $crate::logging::LogEvent::error($code, $message), span = $span)
    };
    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::__emit_event!($crate::logging::LogLevel::Error,
            $crate::logging::LogEvent::error($code, $message) $(; $key => $value)+)
    };
    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::__emit_event!($crate::logging::LogLevel::Error,
            $crate::logging::LogEvent::error($code, $message), span = $span $(; $key => $value)+)
    };
}

/// Info event carrying a success code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__emit_event!($crate::logging::LogLevel::Info,
            $crate::logging::LogEvent::success($code, $message) $(; $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__emit_event!($crate::logging::LogLevel::Info,
            $crate::logging::LogEvent::info($message) $(; $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__emit_event!($crate::logging::LogLevel::Debug,
            $crate::logging::LogEvent::debug($message) $(; $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__emit_event!($crate::logging::LogLevel::Warning,
            $crate::logging::LogEvent::warning($message) $(; $key => $value)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::Span;

    #[test]
    fn test_macro_forms_expand() {
        let offset: usize = 7;
        let reason = String::from("escape before plain byte");

        log_error!(codes::lexical::INVALID_ESCAPE, "Invalid escape");
        log_error!(codes::lexical::INVALID_ESCAPE, &reason, span = Span::new(offset, 1));
        log_error!(codes::lexical::INVALID_ESCAPE, "Invalid escape",
            "offset" => offset,
            "byte" => format!("{:02x}", 0x21u8)
        );
        log_error!(codes::lexical::INVALID_ESCAPE, "Invalid escape",
            span = Span::new(offset, 1),
            "offset" => offset
        );
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenized", "tokens" => 3);
        log_success!(codes::success::DIRECTIVES_APPLIED, "Preamble applied");
        log_info!("Token statistics", "brackets" => 2);
        log_debug!("Text run scanned", "length" => offset);
        log_warning!("Bootstrap ignored");
    }
}
