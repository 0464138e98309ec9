//! Pure aggregation over timelines. Every function here takes its input as
//! an argument and returns a fresh value; nothing reads ambient state, so
//! summaries for different thresholds can be computed from the same pass.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use dbtrace_types::QueryEvent;
use serde::Serialize;

use crate::timeline::TraceTimeline;

/// Per-trace summary statistics.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub trace_id: String,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    /// Wall time from first to last record of the trace; 0 with fewer than
    /// two distinct timestamps
    pub total_duration_ms: i64,
    pub query_count: usize,
    /// Events at or above the threshold the summary was computed with
    pub slow_query_count: usize,
    /// Whether any query event of the trace carries the error flag
    pub has_error: bool,
    /// Whether any record of the trace was flagged, query or not. A trace
    /// whose queries all succeed but whose handler then throws shows up
    /// here and not in `has_error`.
    pub has_record_error: bool,
    /// Events whose normalized statement occurs more than once
    pub duplicate_count: usize,
}

/// One group of query events sharing a normalized statement.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// The shared duplicate-detection key
    pub normalized_statement: String,
    pub occurrence_count: usize,
    /// Raw text of the group's first occurrence
    pub example_statement: String,
}

/// Summarize one timeline against a slow-query threshold.
pub fn summarize(timeline: &TraceTimeline, slow_threshold_ms: f64) -> AnalysisResult {
    let total_duration_ms = match (timeline.first_seen, timeline.last_seen) {
        (Some(first), Some(last)) => (last - first).num_milliseconds(),
        _ => 0,
    };

    let duplicate_count = duplicate_groups(&timeline.events)
        .iter()
        .map(|group| group.occurrence_count)
        .sum();

    AnalysisResult {
        trace_id: timeline.trace_id.clone(),
        start_time: timeline.first_seen,
        end_time: timeline.last_seen,
        total_duration_ms,
        query_count: timeline.events.len(),
        slow_query_count: slow_queries(&timeline.events, slow_threshold_ms).len(),
        has_error: timeline.events.iter().any(|event| event.is_error),
        has_record_error: timeline.error_record_count > 0,
        duplicate_count,
    }
}

/// Events whose measured duration is at or above the threshold.
///
/// Events carrying the unknown-duration sentinel never qualify: an unknown
/// timing must not alias to "slower than everything".
pub fn slow_queries(events: &[QueryEvent], threshold_ms: f64) -> Vec<&QueryEvent> {
    events
        .iter()
        .filter(|event| event.has_duration() && event.duration_ms >= threshold_ms)
        .collect()
}

/// Group events by normalized statement and keep the groups that occur more
/// than once, ordered by occurrence count descending; groups with equal
/// counts keep first-seen order.
pub fn duplicate_groups(events: &[QueryEvent]) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        match index.get(event.normalized_statement.as_str()) {
            Some(&slot) => groups[slot].occurrence_count += 1,
            None => {
                index.insert(event.normalized_statement.as_str(), groups.len());
                groups.push(DuplicateGroup {
                    normalized_statement: event.normalized_statement.clone(),
                    occurrence_count: 1,
                    example_statement: event.statement.clone(),
                });
            }
        }
    }

    groups.retain(|group| group.occurrence_count > 1);
    // stable sort keeps first-seen order within equal counts
    groups.sort_by(|a, b| b.occurrence_count.cmp(&a.occurrence_count));
    groups
}
