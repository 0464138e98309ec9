//! Anchored parsing of the fixed log-line layout:
//!
//! ```text
//! 2025-09-05 12:34:56,789 billing-api [http-nio-8080-exec-1] [traceId: 78fc5a08] \
//!     [spanId: 0b2a9f1c] [companyId: 42] [userId: 1001]  INFO com.example.OrderService - message
//! ```
//!
//! Each field has its own sub-matcher, composed left to right in
//! [`parse_line`]. That keeps edge cases (sentinel tokens, level padding,
//! timestamp variants) testable per field instead of through one opaque
//! expression. A line that fails any field is not a record; what happens to
//! it is the [`LineParser`]'s continuation policy.

use chrono::NaiveDateTime;
use dbtrace_types::{LogLevel, LogRecord};
use regex::Regex;
use std::sync::LazyLock;

/// Timestamp shape accepted at the start of a line. Both the space and `T`
/// date/time separators occur in the wild, as do `,` and `.` before the
/// fraction.
static TIMESTAMP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}[,.]\d{3,6}").unwrap());

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Match the anchored timestamp and return it with the rest of the line.
/// Shapes that look right but do not name a real instant (month 13) fail.
fn take_timestamp(input: &str) -> Option<(NaiveDateTime, &str)> {
    let matched = TIMESTAMP_REGEX.find(input)?;
    let raw = matched.as_str().replace(',', ".");
    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(&raw, format) {
            return Some((timestamp, &input[matched.end()..]));
        }
    }
    None
}

/// Take the next whitespace-delimited token.
fn take_token(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.find(char::is_whitespace) {
        Some(end) => Some((&trimmed[..end], &trimmed[end..])),
        None => Some((trimmed, "")),
    }
}

/// Take a `[value]` field. The value is anything up to the closing bracket,
/// so thread names containing spaces survive.
fn take_bracketed(input: &str) -> Option<(&str, &str)> {
    let rest = input.trim_start().strip_prefix('[')?;
    let end = rest.find(']')?;
    Some((&rest[..end], &rest[end + 1..]))
}

/// Take a `[label: value]` field, checking the label. The value is kept
/// verbatim, sentinel tokens included.
fn take_labeled<'a>(input: &'a str, label: &str) -> Option<(&'a str, &'a str)> {
    let (body, rest) = take_bracketed(input)?;
    let value = body.strip_prefix(label)?.strip_prefix(':')?;
    Some((value.trim(), rest))
}

/// Take the level token. The layout left-pads levels to five columns, so the
/// padding has already been consumed as token whitespace here.
fn take_level(input: &str) -> Option<(LogLevel, &str)> {
    let (token, rest) = take_token(input)?;
    Some((LogLevel::from_token(token)?, rest))
}

/// Parse one anchored line into a [`LogRecord`], or `None` when the line
/// does not match the layout. `line_no` is 1-based.
pub fn parse_line(line: &str, line_no: usize) -> Option<LogRecord> {
    let (timestamp, rest) = take_timestamp(line)?;
    let (context_name, rest) = take_token(rest)?;
    let (thread, rest) = take_bracketed(rest)?;
    let (trace_id, rest) = take_labeled(rest, "traceId")?;
    let (span_id, rest) = take_labeled(rest, "spanId")?;
    let (company_id, rest) = take_labeled(rest, "companyId")?;
    let (user_id, rest) = take_labeled(rest, "userId")?;
    let (level, rest) = take_level(rest)?;
    let (logger, rest) = take_token(rest)?;
    let (separator, rest) = take_token(rest)?;
    if separator != "-" {
        return None;
    }

    Some(LogRecord {
        line: line_no,
        timestamp,
        context_name: context_name.to_string(),
        thread: thread.to_string(),
        trace_id: trace_id.to_string(),
        span_id: span_id.to_string(),
        company_id: company_id.to_string(),
        user_id: user_id.to_string(),
        level,
        logger: logger.to_string(),
        message: rest.trim_start().to_string(),
    })
}

/// What to do with a non-blank line that does not match the anchored layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinuationPolicy {
    /// Append the line to the message of the preceding record. Stack traces
    /// and pretty-printed SQL bodies stay with the entry that emitted them.
    #[default]
    Attach,
    /// Count the line as skipped and drop it.
    Drop,
}

/// Stateful line-by-line parser holding the one-record continuation buffer.
///
/// A record is only released once the next anchored line (or end of input)
/// proves no further continuation lines can arrive, so released records
/// always carry their complete multi-line message.
#[derive(Debug)]
pub struct LineParser {
    policy: ContinuationPolicy,
    pending: Option<LogRecord>,
    skipped: usize,
    continuations: usize,
}

impl LineParser {
    pub fn new(policy: ContinuationPolicy) -> Self {
        Self {
            policy,
            pending: None,
            skipped: 0,
            continuations: 0,
        }
    }

    /// Feed the next line. Returns the previously buffered record when this
    /// line starts a new one. Blank lines are separators and carry nothing.
    pub fn feed(&mut self, line: &str, line_no: usize) -> Option<LogRecord> {
        if line.trim().is_empty() {
            return None;
        }

        match parse_line(line, line_no) {
            Some(record) => self.pending.replace(record),
            None => {
                match (&mut self.pending, self.policy) {
                    (Some(pending), ContinuationPolicy::Attach) => {
                        pending.message.push('\n');
                        pending.message.push_str(line);
                        self.continuations += 1;
                    }
                    // Drop policy, or nothing yet to attach to
                    _ => self.skipped += 1,
                }
                None
            }
        }
    }

    /// Release the record still buffered at end of input.
    pub fn finish(&mut self) -> Option<LogRecord> {
        self.pending.take()
    }

    /// Non-blank lines that matched no layout and were dropped.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    /// Lines folded into a preceding record under [`ContinuationPolicy::Attach`].
    pub fn continuation_lines(&self) -> usize {
        self.continuations
    }
}
