use std::collections::HashMap;

use dbtrace_parse::{extract_query, record_signals_error};
use dbtrace_types::LogRecord;

use crate::timeline::TraceTimeline;

/// Single-pass correlator: routes records of the requested traces into
/// per-trace timelines, running query extraction as it goes.
///
/// Timelines are seeded from the request up front, so ids that never appear
/// in the input still come back (empty), and the result always has the
/// shape and order of the request. Records of unrequested traces are
/// dropped without buffering, which is what keeps memory bounded on large
/// files.
#[derive(Debug)]
pub struct Correlator {
    timelines: Vec<TraceTimeline>,
    index: HashMap<String, usize>,
}

impl Correlator {
    pub fn new(trace_ids: &[String]) -> Self {
        let mut timelines = Vec::with_capacity(trace_ids.len());
        let mut index = HashMap::with_capacity(trace_ids.len());
        for trace_id in trace_ids {
            if index.contains_key(trace_id) {
                // duplicate request entries collapse onto one timeline
                continue;
            }
            index.insert(trace_id.clone(), timelines.len());
            timelines.push(TraceTimeline::new(trace_id.clone()));
        }
        Self { timelines, index }
    }

    /// Fold one record into its trace's timeline, if that trace was asked for.
    pub fn observe(&mut self, record: &LogRecord) {
        let Some(&slot) = self.index.get(&record.trace_id) else {
            return;
        };
        let timeline = &mut self.timelines[slot];
        timeline.observe(record.timestamp, record_signals_error(record));
        if let Some(event) = extract_query(record) {
            timeline.push(event);
        }
    }

    /// Hand back the timelines in request order.
    pub fn into_timelines(self) -> Vec<TraceTimeline> {
        self.timelines
    }
}
