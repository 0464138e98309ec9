//! Correlation and analysis engine: streams a log file once, routes records
//! of the requested traces into per-trace timelines, and derives summary
//! statistics from them.
//!
//! The CLI goes through [`analyze`]. The stages underneath are usable on
//! their own: [`Correlator`] for the routing pass, the functions in
//! [`analysis`] for threshold filtering, duplicate grouping and summaries.

pub mod analysis;
pub mod correlate;
pub mod error;
pub mod options;
mod report;
pub mod timeline;

pub use analysis::{AnalysisResult, DuplicateGroup, duplicate_groups, slow_queries, summarize};
pub use correlate::Correlator;
pub use error::{Error, Result};
pub use options::{
    AnalysisMode, AnalyzeOptions, DEFAULT_ANALYSE_THRESHOLD_MS, DEFAULT_SLOW_LIST_THRESHOLD_MS,
};
pub use report::AnalysisReport;
pub use timeline::TraceTimeline;

// Re-exported so callers can configure a pass without a direct dependency
// on the parse crate
pub use dbtrace_parse::ContinuationPolicy;

use dbtrace_parse::LineParser;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Run one analysis pass over a log file.
///
/// Validates the options, then streams the file line by line: each line goes
/// through the layout parser under the configured continuation policy, and
/// every released record is folded into the correlator. Memory is bounded by
/// the query events of the requested traces, not by file size.
///
/// Unreadable files and invalid UTF-8 fail the pass; there are no partial
/// results.
pub fn analyze(path: &Path, options: &AnalyzeOptions) -> Result<AnalysisReport> {
    options.validate()?;

    let file = File::open(path).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut parser = LineParser::new(options.continuation);
    let mut correlator = Correlator::new(&options.trace_ids);
    let mut lines_read = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::Input {
            path: path.to_path_buf(),
            source,
        })?;
        lines_read += 1;
        if let Some(record) = parser.feed(&line, index + 1) {
            correlator.observe(&record);
        }
    }
    if let Some(record) = parser.finish() {
        correlator.observe(&record);
    }

    Ok(AnalysisReport {
        timelines: correlator.into_timelines(),
        lines_read,
        skipped_lines: parser.skipped_lines(),
        continuation_lines: parser.continuation_lines(),
    })
}
