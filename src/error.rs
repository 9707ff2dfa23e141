use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the logger.
///
/// Most of these never reach the caller of an emission method: file append
/// failures are reported on the diagnostic channel and swallowed. Only
/// configuration calls and `timer_start` return them.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A required argument was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The date locale is not known to the date formatter.
    #[error("unknown date locale: {0}")]
    UnknownLocale(String),

    /// A strftime pattern contains an unsupported specifier.
    #[error("invalid date pattern: {0}")]
    InvalidDatePattern(String),

    /// Filesystem operation on the log file or its directory failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be loaded or holds bad values.
    #[error("configuration error: {0}")]
    Config(String),

    /// A global `log` logger was already registered for this process.
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

impl LoggerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
