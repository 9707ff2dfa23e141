use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::LoggerError;

/// Destination for console output.
///
/// The logger hands every rendered, colorized line to `write_line` and every
/// file-write failure report to `write_diagnostic`. Implementations decide
/// where those go: the terminal, a test buffer, a UI pane.
///
/// # Usage
///
/// ```
/// # use banana_logger::ConsoleSink;
/// # use std::sync::Mutex;
/// // Sink that keeps only the last line
/// struct LastLine(Mutex<String>);
///
/// impl ConsoleSink for LastLine {
///     fn write_line(&self, line: &str) {
///         *self.0.lock().unwrap() = line.to_string();
///     }
///
///     fn write_diagnostic(&self, _line: &str) {}
/// }
/// ```
pub trait ConsoleSink: Send {
    /// Receives one emitted line, color escapes included.
    fn write_line(&self, line: &str);

    /// Receives a report about a failure that did not abort the emission.
    fn write_diagnostic(&self, line: &str);
}

/// Writes lines to standard output and diagnostics to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl ConsoleSink for StdConsole {
    fn write_line(&self, line: &str) {
        // a closed stdout must not take the caller down
        let _ = writeln!(io::stdout().lock(), "{line}");
    }

    fn write_diagnostic(&self, line: &str) {
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// Keeps every line in memory.
///
/// Clones share the same buffers.
///
/// ```
/// # use banana_logger::{Logger, MemorySink};
/// let sink = MemorySink::new();
/// let mut logger = Logger::with_sink(sink.clone());
/// logger.info(["hello"]);
/// assert!(sink.lines()[0].contains("[INFO] hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    diagnostics: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
        self.diagnostics.lock().clear();
    }
}

impl ConsoleSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }

    fn write_diagnostic(&self, line: &str) {
        self.diagnostics.lock().push(line.to_string());
    }
}

/// Appends `line` and a newline to `path`.
///
/// The file is opened, written and closed on every call; nothing stays open
/// between records.
pub fn append_line(path: &Path, line: &str) -> Result<(), LoggerError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::io(path, e))?;

    let mut record = String::with_capacity(line.len() + 1);
    record.push_str(line);
    record.push('\n');

    file.write_all(record.as_bytes())
        .map_err(|e| LoggerError::io(path, e))
}

/// Creates the parent directory of `path` when it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), LoggerError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| LoggerError::io(parent, e))?;
            tracing::debug!(dir = %parent.display(), "created log directory");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_append_accumulates_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.log");

        append_line(&path, "first").unwrap();
        append_line(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_append_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.log");

        let err = append_line(&path, "x").unwrap_err();
        assert!(matches!(err, LoggerError::Io { .. }));
    }

    #[test]
    fn test_ensure_parent_dir_is_recursive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.log");

        ensure_parent_dir(&path).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
        // second call is a no-op
        ensure_parent_dir(&path).unwrap();
    }

    #[test]
    fn test_bare_file_name_needs_no_dir() {
        ensure_parent_dir(Path::new("plain.log")).unwrap();
    }

    #[test]
    fn test_memory_sink_clones_share_buffers() {
        let sink = MemorySink::new();
        let other = sink.clone();
        other.write_line("a");
        other.write_diagnostic("b");
        assert_eq!(sink.lines(), vec!["a".to_string()]);
        assert_eq!(sink.diagnostics(), vec!["b".to_string()]);
        sink.clear();
        assert!(other.lines().is_empty());
    }
}
