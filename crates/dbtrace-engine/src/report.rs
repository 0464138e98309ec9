use dbtrace_types::QueryEvent;

use crate::timeline::TraceTimeline;

/// Outcome of one analysis pass: per-trace timelines in request order plus
/// pass diagnostics callers may want to surface.
#[derive(Debug)]
pub struct AnalysisReport {
    pub timelines: Vec<TraceTimeline>,
    /// Lines read from the input, blank lines included
    pub lines_read: usize,
    /// Non-blank lines that matched no layout and were dropped
    pub skipped_lines: usize,
    /// Lines folded into a preceding record as continuations
    pub continuation_lines: usize,
}

impl AnalysisReport {
    /// Query events of all requested traces, merged back into file order.
    /// Listings over several traces read like the log did.
    pub fn events_in_file_order(&self) -> Vec<&QueryEvent> {
        let mut events: Vec<&QueryEvent> = self
            .timelines
            .iter()
            .flat_map(|timeline| timeline.events.iter())
            .collect();
        events.sort_by_key(|event| event.line);
        events
    }
}
