use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use dbtrace_types::QueryEvent;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::types::OutputFormat;

/// Render rows as a boxed grid, or the empty-state placeholder.
pub fn render_table(headers: &[&str], rows: Vec<Vec<Cell>>) -> String {
    if rows.is_empty() {
        return "(no results)".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Render the payload in the requested format. The table shape is
/// column-specific, so the caller supplies it.
pub fn render<T: Serialize>(
    format: OutputFormat,
    payload: &T,
    table: impl FnOnce() -> String,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => table(),
        OutputFormat::Json => serde_json::to_string_pretty(payload)?,
        OutputFormat::Yaml => serde_yaml::to_string(payload)?.trim_end().to_string(),
    })
}

/// Print to stdout and mirror the same bytes to the output file when one was
/// requested. The file note goes to stderr, and only in table mode, so
/// machine formats stay clean on both streams.
pub fn emit(rendered: &str, format: OutputFormat, output_file: Option<&Path>) -> Result<()> {
    println!("{}", rendered);

    if let Some(path) = output_file {
        if format == OutputFormat::Table {
            eprintln!(
                "{}",
                format!("Writing output to file: {}", path.display()).bright_black()
            );
        }
        fs::write(path, format!("{}\n", rendered))
            .with_context(|| format!("cannot write output file '{}'", path.display()))?;
    }

    Ok(())
}

/// One-line notice about lines that matched no layout. Suppressed for
/// machine formats and via DBTRACE_NO_SKIP_WARN.
pub fn warn_skipped(skipped: usize, format: OutputFormat) {
    if skipped == 0 || format != OutputFormat::Table {
        return;
    }
    if std::env::var("DBTRACE_NO_SKIP_WARN").is_ok() {
        return;
    }

    eprintln!(
        "Warning: {} lines did not match the log layout and were skipped",
        skipped
    );
}

pub fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    match timestamp {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => "-".to_string(),
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub const QUERY_HEADERS: [&str; 7] = [
    "Line",
    "Time",
    "Trace",
    "Statement",
    "Duration (ms)",
    "Rows",
    "Err",
];

/// Rows for the query listing, shared by the full and slow-only listings.
pub fn query_rows(events: &[&QueryEvent]) -> Vec<Vec<Cell>> {
    events
        .iter()
        .map(|event| {
            let duration = if event.has_duration() {
                event.duration_ms.to_string()
            } else {
                "-".to_string()
            };
            let rows = if event.has_row_count() {
                event.row_count.to_string()
            } else {
                "-".to_string()
            };
            vec![
                Cell::new(event.line),
                Cell::new(format_timestamp(Some(event.timestamp))),
                Cell::new(&event.trace_id),
                Cell::new(&event.statement),
                Cell::new(duration),
                Cell::new(rows),
                Cell::new(yes_no(event.is_error)),
            ]
        })
        .collect()
}
