use std::path::Path;

use anyhow::Result;
use dbtrace_engine::{AnalyzeOptions, analyze};

use crate::output;
use crate::types::{MultilineMode, OutputFormat};

pub fn handle(
    log_file: &Path,
    trace_ids: Vec<String>,
    multiline: MultilineMode,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    let mut options = AnalyzeOptions::new(trace_ids);
    options.continuation = multiline.into();

    let report = analyze(log_file, &options)?;
    output::warn_skipped(report.skipped_lines, format);

    let events = report.events_in_file_order();
    let rendered = output::render(format, &events, || {
        output::render_table(&output::QUERY_HEADERS, output::query_rows(&events))
    })?;
    output::emit(&rendered, format, output_file)
}
