use std::fmt;
use std::path::PathBuf;

/// Result type for dbtrace-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// Log file missing, unreadable, or not valid UTF-8
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rejected analysis options (unsupported mode, out-of-range threshold)
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Input { path, source } => {
                write!(f, "cannot read log file '{}': {}", path.display(), source)
            }
            Error::Config(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Input { source, .. } => Some(source),
            Error::Config(_) => None,
        }
    }
}
