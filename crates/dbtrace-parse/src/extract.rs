//! Query-event extraction from parsed log records.
//!
//! Extraction is message-driven. Three shapes are recognized, tried in
//! order, first match wins:
//!
//! 1. slow-query report: `SlowQuery: <ms> milliseconds. SQL: '<stmt>'`
//! 2. metrics suffix: `<stmt> (<ms> ms)` or `<stmt> (<ms> ms, <n> rows)`
//! 3. bare statement, when the logger is the SQL logger
//!
//! Timing and row counts a shape does not carry come back as the `-1`
//! sentinels, never as fabricated zeros.

use dbtrace_types::{LogLevel, LogRecord, QueryEvent, UNKNOWN_DURATION_MS, UNKNOWN_ROW_COUNT};
use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::normalize_statement;

/// Hibernate-style slow-query report. The statement runs to the last quote,
/// so inner `'...'` literals stay intact and trailing attached lines (a
/// quoteless stack trace) fall outside the capture.
static SLOW_QUERY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^SlowQuery:\s*(?P<dur>[0-9.]+)\s*milliseconds\.\s*SQL:\s*'(?P<stmt>.+)'")
        .unwrap()
});

/// Statement with a trailing metrics suffix, e.g.
/// `update orders set status = 'SENT' where id = 42 (3.2 ms, 1 rows)`.
/// Gated on a leading SQL verb so prose that happens to end in a timing
/// note is not mistaken for a query.
static METRICS_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^(?P<stmt>(?:select|insert|update|delete|with|merge|call|create|alter|drop|truncate)\b.*?)\s*\(\s*(?P<dur>[0-9.]+)\s*ms\s*(?:,\s*(?P<rows>[0-9]+)\s*rows?\s*)?\)$",
    )
    .unwrap()
});

/// Best-effort failure markers searched anywhere in the message.
static ERROR_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(exception|traceback|error|failed)").unwrap());

/// Logger whose whole message is a bare SQL statement.
const SQL_LOGGER: &str = "org.hibernate.SQL";

/// Whether the record carries a failure signal: ERROR level, or a failure
/// marker in the message. A heuristic; it catches exception class names and
/// "failed" wording, not every possible failure.
pub fn record_signals_error(record: &LogRecord) -> bool {
    record.level == LogLevel::Error || ERROR_MARKER_REGEX.is_match(&record.message)
}

/// Extract the query event carried by this record's message, if any.
pub fn extract_query(record: &LogRecord) -> Option<QueryEvent> {
    let message = record.message.trim();

    let (statement, duration_ms, row_count) = if let Some(caps) = SLOW_QUERY_REGEX.captures(message)
    {
        // A malformed number that still fits the shape keeps the event but
        // loses the measurement
        let duration = caps["dur"].parse::<f64>().unwrap_or(UNKNOWN_DURATION_MS);
        (caps["stmt"].trim().to_string(), duration, UNKNOWN_ROW_COUNT)
    } else if let Some(caps) = METRICS_SUFFIX_REGEX.captures(message) {
        let duration = caps["dur"].parse::<f64>().unwrap_or(UNKNOWN_DURATION_MS);
        let rows = caps
            .name("rows")
            .map(|m| m.as_str().parse::<i64>().unwrap_or(UNKNOWN_ROW_COUNT))
            .unwrap_or(UNKNOWN_ROW_COUNT);
        (caps["stmt"].trim().to_string(), duration, rows)
    } else if record.logger.eq_ignore_ascii_case(SQL_LOGGER) {
        if message.is_empty() {
            return None;
        }
        (message.to_string(), UNKNOWN_DURATION_MS, UNKNOWN_ROW_COUNT)
    } else {
        return None;
    };

    Some(QueryEvent {
        line: record.line,
        timestamp: record.timestamp,
        trace_id: record.trace_id.clone(),
        normalized_statement: normalize_statement(&statement),
        statement,
        duration_ms,
        row_count,
        is_error: record_signals_error(record),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(level: LogLevel, logger: &str, message: &str) -> LogRecord {
        LogRecord {
            line: 1,
            timestamp: NaiveDate::from_ymd_opt(2025, 9, 5)
                .unwrap()
                .and_hms_milli_opt(12, 0, 0, 0)
                .unwrap(),
            context_name: "billing-api".to_string(),
            thread: "main".to_string(),
            trace_id: "78fc5a08".to_string(),
            span_id: "0b2a9f1c".to_string(),
            company_id: "42".to_string(),
            user_id: "1001".to_string(),
            level,
            logger: logger.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_slow_query_report_carries_duration() {
        let rec = record(
            LogLevel::Info,
            "org.hibernate.SQL_SLOW",
            "SlowQuery: 150 milliseconds. SQL: 'select o.id from orders o where o.status = 'OPEN''",
        );
        let event = extract_query(&rec).unwrap();
        assert_eq!(
            event.statement,
            "select o.id from orders o where o.status = 'OPEN'"
        );
        assert_eq!(event.duration_ms, 150.0);
        assert_eq!(event.row_count, UNKNOWN_ROW_COUNT);
        assert_eq!(event.trace_id, "78fc5a08");
    }

    #[test]
    fn test_slow_query_report_is_case_insensitive() {
        let rec = record(
            LogLevel::Info,
            "org.hibernate.SQL_SLOW",
            "slowquery: 89.5 milliseconds. sql: 'SELECT 1'",
        );
        let event = extract_query(&rec).unwrap();
        assert_eq!(event.statement, "SELECT 1"); // raw case preserved
        assert_eq!(event.duration_ms, 89.5);
    }

    #[test]
    fn test_malformed_duration_becomes_sentinel_not_zero() {
        let rec = record(
            LogLevel::Info,
            "org.hibernate.SQL_SLOW",
            "SlowQuery: 1.2.3 milliseconds. SQL: 'select 1'",
        );
        let event = extract_query(&rec).unwrap();
        assert_eq!(event.duration_ms, UNKNOWN_DURATION_MS);
        assert!(!event.has_duration());
    }

    #[test]
    fn test_metrics_suffix_with_rows() {
        let rec = record(
            LogLevel::Debug,
            "com.example.QueryTimer",
            "update orders set status = 'SENT' where id = 42 (3.2 ms, 1 rows)",
        );
        let event = extract_query(&rec).unwrap();
        assert_eq!(event.statement, "update orders set status = 'SENT' where id = 42");
        assert_eq!(event.duration_ms, 3.2);
        assert_eq!(event.row_count, 1);
    }

    #[test]
    fn test_metrics_suffix_without_rows() {
        let rec = record(
            LogLevel::Debug,
            "com.example.QueryTimer",
            "select * from users (12 ms)",
        );
        let event = extract_query(&rec).unwrap();
        assert_eq!(event.statement, "select * from users");
        assert_eq!(event.duration_ms, 12.0);
        assert_eq!(event.row_count, UNKNOWN_ROW_COUNT);
    }

    #[test]
    fn test_metrics_suffix_row_overflow_becomes_sentinel() {
        let rec = record(
            LogLevel::Debug,
            "com.example.QueryTimer",
            "select 1 (5 ms, 99999999999999999999 rows)",
        );
        let event = extract_query(&rec).unwrap();
        assert_eq!(event.duration_ms, 5.0);
        assert_eq!(event.row_count, UNKNOWN_ROW_COUNT);
    }

    #[test]
    fn test_prose_with_timing_note_is_not_a_query() {
        let rec = record(
            LogLevel::Info,
            "com.example.BatchJob",
            "processed 3 messages (12 ms)",
        );
        assert!(extract_query(&rec).is_none());
    }

    #[test]
    fn test_bare_statement_requires_the_sql_logger() {
        let rec = record(LogLevel::Debug, "org.hibernate.SQL", "select * from orders");
        let event = extract_query(&rec).unwrap();
        assert_eq!(event.statement, "select * from orders");
        assert_eq!(event.duration_ms, UNKNOWN_DURATION_MS);
        assert_eq!(event.row_count, UNKNOWN_ROW_COUNT);

        let other = record(LogLevel::Debug, "com.example.Repo", "select * from orders");
        assert!(extract_query(&other).is_none());
    }

    #[test]
    fn test_sql_logger_match_ignores_case() {
        let rec = record(LogLevel::Debug, "ORG.HIBERNATE.SQL", "select 1");
        assert!(extract_query(&rec).is_some());
    }

    #[test]
    fn test_empty_message_on_sql_logger_is_not_a_query() {
        let rec = record(LogLevel::Debug, "org.hibernate.SQL", "   ");
        assert!(extract_query(&rec).is_none());
    }

    #[test]
    fn test_multi_line_statement_stays_one_event() {
        let rec = record(
            LogLevel::Debug,
            "org.hibernate.SQL",
            "select *\n    from orders\n    where status = 'OPEN'",
        );
        let event = extract_query(&rec).unwrap();
        assert!(event.statement.contains('\n'));
        assert_eq!(
            event.normalized_statement,
            "select * from orders where status = ?"
        );
    }

    #[test]
    fn test_error_flag_from_level_or_marker() {
        let by_level = record(LogLevel::Error, "org.hibernate.SQL", "select 1");
        assert!(extract_query(&by_level).unwrap().is_error);

        let by_marker = record(
            LogLevel::Warn,
            "org.hibernate.SQL",
            "select 1 /* SQLException: lock timeout */",
        );
        assert!(extract_query(&by_marker).unwrap().is_error);

        let clean = record(LogLevel::Debug, "org.hibernate.SQL", "select 1");
        assert!(!extract_query(&clean).unwrap().is_error);
    }

    #[test]
    fn test_record_error_signal_without_query() {
        let rec = record(
            LogLevel::Info,
            "com.example.Payments",
            "payment failed after 2 retries",
        );
        assert!(record_signals_error(&rec));
        assert!(extract_query(&rec).is_none());
    }
}
