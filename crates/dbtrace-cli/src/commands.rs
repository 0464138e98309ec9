use super::args::{Cli, Commands};
use super::handlers;
use anyhow::{Result, bail};

pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        format,
        output_file,
        multiline,
        command,
    } = cli;
    let output_file = output_file.as_deref();

    match command {
        Commands::Analyse {
            log_file,
            trace_ids,
            mode,
            slow_ms,
        } => handlers::analyse::handle(
            &log_file,
            split_trace_ids(&trace_ids)?,
            &mode,
            slow_ms,
            multiline,
            format,
            output_file,
        ),

        Commands::ListQueries {
            log_file,
            trace_ids,
        } => handlers::queries::handle(
            &log_file,
            split_trace_ids(&trace_ids)?,
            multiline,
            format,
            output_file,
        ),

        Commands::ListSlowQueries {
            log_file,
            trace_ids,
            slow_ms,
        } => handlers::slow::handle(
            &log_file,
            split_trace_ids(&trace_ids)?,
            slow_ms,
            multiline,
            format,
            output_file,
        ),

        Commands::ListDuplicateQueries {
            log_file,
            trace_ids,
        } => handlers::duplicates::handle(
            &log_file,
            split_trace_ids(&trace_ids)?,
            multiline,
            format,
            output_file,
        ),
    }
}

/// Split the comma-separated trace-id argument. Blank entries ("a,,b", a
/// trailing comma) are dropped; duplicates are left for the engine to
/// collapse.
fn split_trace_ids(raw: &str) -> Result<Vec<String>> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        bail!("no trace ids given (expected a comma-separated list)");
    }
    Ok(ids)
}
