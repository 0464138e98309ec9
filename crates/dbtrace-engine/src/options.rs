use crate::error::{Error, Result};
use dbtrace_parse::ContinuationPolicy;
use std::fmt;
use std::str::FromStr;

/// Default slow-query threshold for the combined per-trace summary.
pub const DEFAULT_ANALYSE_THRESHOLD_MS: f64 = 500.0;

/// Default threshold for the standalone slow-query listing.
pub const DEFAULT_SLOW_LIST_THRESHOLD_MS: f64 = 100.0;

/// Kind of analysis to run. Only database-query analysis exists today; the
/// enum keeps the surface honest about what it accepts instead of silently
/// swallowing unknown modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    #[default]
    Db,
}

impl FromStr for AnalysisMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("db") {
            Ok(AnalysisMode::Db)
        } else {
            Err(Error::Config(format!(
                "unsupported analysis mode '{}' (only DB is available)",
                s
            )))
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Db => write!(f, "DB"),
        }
    }
}

/// Configuration for one analysis pass. There is no process-wide state:
/// batch callers build one value per run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Trace ids to correlate, already split and trimmed by the caller.
    /// May be empty; the pass then only counts lines.
    pub trace_ids: Vec<String>,
    pub mode: AnalysisMode,
    /// Slow-query threshold in milliseconds, strictly positive
    pub slow_threshold_ms: f64,
    /// What to do with lines that do not match the anchored layout
    pub continuation: ContinuationPolicy,
}

impl AnalyzeOptions {
    pub fn new(trace_ids: Vec<String>) -> Self {
        Self {
            trace_ids,
            mode: AnalysisMode::Db,
            slow_threshold_ms: DEFAULT_ANALYSE_THRESHOLD_MS,
            continuation: ContinuationPolicy::Attach,
        }
    }

    /// Reject bad option combinations before any file is opened.
    pub fn validate(&self) -> Result<()> {
        if !(self.slow_threshold_ms > 0.0) {
            return Err(Error::Config(format!(
                "slow-query threshold must be a positive number of milliseconds, got {}",
                self.slow_threshold_ms
            )));
        }
        Ok(())
    }
}
