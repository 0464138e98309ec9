use clap::ValueEnum;
use dbtrace_engine::ContinuationPolicy;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum MultilineMode {
    Attach,
    Drop,
}

impl fmt::Display for MultilineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultilineMode::Attach => write!(f, "attach"),
            MultilineMode::Drop => write!(f, "drop"),
        }
    }
}

impl From<MultilineMode> for ContinuationPolicy {
    fn from(mode: MultilineMode) -> Self {
        match mode {
            MultilineMode::Attach => ContinuationPolicy::Attach,
            MultilineMode::Drop => ContinuationPolicy::Drop,
        }
    }
}
