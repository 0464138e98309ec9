use std::path::Path;

use anyhow::Result;
use dbtrace_engine::{AnalyzeOptions, analyze, slow_queries};
use dbtrace_types::QueryEvent;

use crate::output;
use crate::types::{MultilineMode, OutputFormat};

pub fn handle(
    log_file: &Path,
    trace_ids: Vec<String>,
    slow_ms: f64,
    multiline: MultilineMode,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    let mut options = AnalyzeOptions::new(trace_ids);
    options.slow_threshold_ms = slow_ms;
    options.continuation = multiline.into();

    let report = analyze(log_file, &options)?;
    output::warn_skipped(report.skipped_lines, format);

    let mut slow: Vec<&QueryEvent> = report
        .timelines
        .iter()
        .flat_map(|timeline| slow_queries(&timeline.events, slow_ms))
        .collect();
    slow.sort_by_key(|event| event.line);

    let rendered = output::render(format, &slow, || {
        output::render_table(&output::QUERY_HEADERS, output::query_rows(&slow))
    })?;
    output::emit(&rendered, format, output_file)
}
