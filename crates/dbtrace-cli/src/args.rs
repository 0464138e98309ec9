use crate::types::{MultilineMode, OutputFormat};
use clap::{Parser, Subcommand};
use dbtrace_engine::{DEFAULT_ANALYSE_THRESHOLD_MS, DEFAULT_SLOW_LIST_THRESHOLD_MS};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dbtrace")]
#[command(about = "Analyze database query activity per trace id in application logs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true, help = "Also write the rendered output to this file")]
    pub output_file: Option<PathBuf>,

    #[arg(
        long,
        default_value = "attach",
        global = true,
        help = "Treatment of lines continuing a previous entry (stack traces, wrapped SQL)"
    )]
    pub multiline: MultilineMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Summarize query activity for the given trace ids")]
    Analyse {
        #[arg(help = "Path to the log file")]
        log_file: PathBuf,

        #[arg(help = "Comma-separated trace ids")]
        trace_ids: String,

        #[arg(long, default_value = "DB", help = "Analysis mode")]
        mode: String,

        #[arg(
            long,
            default_value_t = DEFAULT_ANALYSE_THRESHOLD_MS,
            help = "Slow-query threshold in milliseconds"
        )]
        slow_ms: f64,
    },

    #[command(about = "List every query event for the given trace ids")]
    ListQueries {
        #[arg(help = "Path to the log file")]
        log_file: PathBuf,

        #[arg(help = "Comma-separated trace ids")]
        trace_ids: String,
    },

    #[command(about = "List query events at or above the slow threshold")]
    ListSlowQueries {
        #[arg(help = "Path to the log file")]
        log_file: PathBuf,

        #[arg(help = "Comma-separated trace ids")]
        trace_ids: String,

        #[arg(
            long,
            default_value_t = DEFAULT_SLOW_LIST_THRESHOLD_MS,
            help = "Slow-query threshold in milliseconds"
        )]
        slow_ms: f64,
    },

    #[command(about = "List statements issued more than once across the given trace ids")]
    ListDuplicateQueries {
        #[arg(help = "Path to the log file")]
        log_file: PathBuf,

        #[arg(help = "Comma-separated trace ids")]
        trace_ids: String,
    },
}
