use chrono::NaiveDateTime;
use dbtrace_types::QueryEvent;
use serde::Serialize;

/// All activity observed for one trace id during a pass.
///
/// The timing envelope (`first_seen`/`last_seen`) spans every record of the
/// trace, query or not: a trace that logs a request line, one query and a
/// response line is as long as the request/response pair says it is.
#[derive(Debug, Clone, Serialize)]
pub struct TraceTimeline {
    pub trace_id: String,
    /// Query events in file order (append-only during the pass)
    pub events: Vec<QueryEvent>,
    pub first_seen: Option<NaiveDateTime>,
    pub last_seen: Option<NaiveDateTime>,
    /// Records observed for this trace, including non-query lines
    pub record_count: usize,
    /// Records flagged by the failure heuristic, including non-query lines
    pub error_record_count: usize,
}

impl TraceTimeline {
    pub fn new(trace_id: String) -> Self {
        Self {
            trace_id,
            events: Vec::new(),
            first_seen: None,
            last_seen: None,
            record_count: 0,
            error_record_count: 0,
        }
    }

    /// Fold one record of this trace into the timing and error envelope.
    pub fn observe(&mut self, timestamp: NaiveDateTime, is_error: bool) {
        self.record_count += 1;
        if is_error {
            self.error_record_count += 1;
        }
        self.first_seen = Some(match self.first_seen {
            Some(first) => first.min(timestamp),
            None => timestamp,
        });
        self.last_seen = Some(match self.last_seen {
            Some(last) => last.max(timestamp),
            None => timestamp,
        });
    }

    /// Append a query event. Callers feed events in file order, so the list
    /// stays sorted by construction.
    pub fn push(&mut self, event: QueryEvent) {
        self.events.push(event);
    }

    /// Whether the trace id never appeared in the input.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}
