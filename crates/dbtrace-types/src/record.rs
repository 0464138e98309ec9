use crate::level::LogLevel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sentinel the log layout prints when no trace id is in scope.
pub const NO_TRACE: &str = "NO_TRACE";

/// Sentinel for a missing span id.
pub const NO_SPAN: &str = "NO_SPAN";

/// Sentinel for a missing company id.
pub const NO_COMPANY: &str = "NO_COMPANY";

/// Sentinel for a missing user id.
pub const NO_USER: &str = "NO_USER";

/// One log entry parsed from the fixed layout.
///
/// Field values are kept verbatim. In particular the `NO_*` sentinel tokens
/// are not translated into `Option`s, so downstream stages can still tell
/// "absent in the source" apart from an empty value. Use [`LogRecord::has_trace`]
/// instead of comparing against the sentinel directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// 1-based number of the line this entry started on
    pub line: usize,
    pub timestamp: NaiveDateTime,
    /// Application or service name printed after the timestamp
    pub context_name: String,
    pub thread: String,
    pub trace_id: String,
    pub span_id: String,
    pub company_id: String,
    pub user_id: String,
    pub level: LogLevel,
    pub logger: String,
    /// Everything after the `-` separator; continuation lines are appended
    /// with `\n`
    pub message: String,
}

impl LogRecord {
    /// Whether the entry belongs to a real trace (not the `NO_TRACE` sentinel).
    pub fn has_trace(&self) -> bool {
        self.trace_id != NO_TRACE
    }
}
