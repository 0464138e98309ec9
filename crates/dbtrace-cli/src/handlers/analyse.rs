use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use dbtrace_engine::{AnalysisMode, AnalysisResult, AnalyzeOptions, analyze, summarize};

use crate::output;
use crate::types::{MultilineMode, OutputFormat};

pub fn handle(
    log_file: &Path,
    trace_ids: Vec<String>,
    mode: &str,
    slow_ms: f64,
    multiline: MultilineMode,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    let mode = mode.parse::<AnalysisMode>()?;
    let options = AnalyzeOptions {
        trace_ids,
        mode,
        slow_threshold_ms: slow_ms,
        continuation: multiline.into(),
    };

    let report = analyze(log_file, &options)?;
    output::warn_skipped(report.skipped_lines, format);

    let results: Vec<AnalysisResult> = report
        .timelines
        .iter()
        .map(|timeline| summarize(timeline, options.slow_threshold_ms))
        .collect();

    let rendered = output::render(format, &results, || results_table(&results))?;
    output::emit(&rendered, format, output_file)
}

fn results_table(results: &[AnalysisResult]) -> String {
    let headers = [
        "Trace",
        "Start",
        "End",
        "Duration (ms)",
        "Queries",
        "Slow",
        "Query Err",
        "Record Err",
        "Duplicates",
    ];
    let rows = results
        .iter()
        .map(|result| {
            vec![
                Cell::new(&result.trace_id),
                Cell::new(output::format_timestamp(result.start_time)),
                Cell::new(output::format_timestamp(result.end_time)),
                Cell::new(result.total_duration_ms),
                Cell::new(result.query_count),
                Cell::new(result.slow_query_count),
                Cell::new(output::yes_no(result.has_error)),
                Cell::new(output::yes_no(result.has_record_error)),
                Cell::new(result.duplicate_count),
            ]
        })
        .collect();
    output::render_table(&headers, rows)
}
