use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log record, as printed by the fixed log layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Match the exact uppercase token the layout emits. Padding must be
    /// stripped by the caller; anything else is not a level token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TRACE" => Some(LogLevel::Trace),
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_accepts_layout_tokens_only() {
        assert_eq!(LogLevel::from_token("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_token("ERROR"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_token("info"), None); // layout never lowercases
        assert_eq!(LogLevel::from_token(" INFO"), None); // padding is the caller's job
        assert_eq!(LogLevel::from_token("FATAL"), None);
    }

    #[test]
    fn test_display_round_trips_token() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            assert_eq!(LogLevel::from_token(&level.to_string()), Some(level));
        }
    }
}
