use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use dbtrace_engine::{AnalyzeOptions, DuplicateGroup, analyze, duplicate_groups};
use dbtrace_types::QueryEvent;

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

    // grouping runs across all requested traces, in file order, so
    // first-seen ties resolve the way the log reads
    let events: Vec<QueryEvent> = report
        .events_in_file_order()
        .into_iter()
        .cloned()
        .collect();
    let groups = duplicate_groups(&events);

    let rendered = output::render(format, &groups, || groups_table(&groups))?;
    output::emit(&rendered, format, output_file)
}

fn groups_table(groups: &[DuplicateGroup]) -> String {
    let headers = ["Count", "Statement", "Example"];
    let rows = groups
        .iter()
        .map(|group| {
            vec![
                Cell::new(group.occurrence_count),
                Cell::new(&group.normalized_statement),
                Cell::new(&group.example_statement),
            ]
        })
        .collect();
    output::render_table(&headers, rows)
}
