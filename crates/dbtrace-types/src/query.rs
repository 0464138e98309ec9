use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Duration sentinel for query lines that carry no timing information.
pub const UNKNOWN_DURATION_MS: f64 = -1.0;

/// Row-count sentinel for query lines that carry no row information.
pub const UNKNOWN_ROW_COUNT: i64 = -1;

/// A database query reconstructed from one log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEvent {
    /// 1-based line number of the record the query was extracted from
    pub line: usize,
    pub timestamp: NaiveDateTime,
    pub trace_id: String,
    /// SQL text as it appeared in the log
    pub statement: String,
    /// Literal-folded form of the statement, the key for duplicate detection
    pub normalized_statement: String,
    /// Execution time in milliseconds, or [`UNKNOWN_DURATION_MS`]
    pub duration_ms: f64,
    /// Rows returned or affected, or [`UNKNOWN_ROW_COUNT`]
    pub row_count: i64,
    /// Best-effort failure flag derived from the record's level and message
    pub is_error: bool,
}

impl QueryEvent {
    /// Whether the event carries real timing information. Sentinel durations
    /// must never enter threshold comparisons or sums.
    pub fn has_duration(&self) -> bool {
        self.duration_ms >= 0.0
    }

    /// Whether the event carries a real row count.
    pub fn has_row_count(&self) -> bool {
        self.row_count >= 0
    }
}
