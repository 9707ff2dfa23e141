use std::path::{Path, PathBuf};

use crate::clock::{Clock, SystemClock};
use crate::config::LoggerConfig;
use crate::error::LoggerError;
use crate::format::{self, DateFormat, DateOptions, JsonRecord, TimerRecord};
use crate::level::{Level, RESET};
use crate::sink::{self, ConsoleSink, StdConsole};
use crate::timer::{format_duration, TimerRegistry};
use crate::value::Value;

/// What an emission writes to the log file, if one is configured.
enum Persist {
    /// Text line or [`JsonRecord`], depending on the file mode.
    Record,
    /// JSON-mode only: [`TimerRecord`] for `timer_end` / `timer_lap`.
    Timer { label: String, elapsed: u64 },
}

/// A decorative console logger.
///
/// Each emitted line carries a timestamp, an optional one-shot tag and the
/// level label, and is printed in the level's color. Lines can be mirrored to
/// a file as plain text or as JSON objects.
///
/// # Thread Safety
///
/// `Logger` takes `&mut self` everywhere and is meant for one thread. It is
/// `Send`; wrap it in a [`SharedLogger`](crate::SharedLogger) to log from
/// several threads.
///
/// # Examples
///
/// ```
/// # use banana_logger::{values, Logger, MemorySink};
/// let sink = MemorySink::new();
/// let mut logger = Logger::with_sink(sink.clone());
///
/// logger.tag("AUTH").info(["User connected"]);
/// logger.warn(values!["retrying in", 5, "seconds"]);
/// logger.debug(["hidden at the default level"]);
///
/// let lines = sink.lines();
/// assert_eq!(lines.len(), 2);
/// assert!(lines[0].contains("[AUTH] [INFO] User connected"));
/// assert!(!lines[1].contains("[AUTH]"));
/// ```
pub struct Logger {
    tag: Option<String>,
    minimum_level: Level,
    date_format: DateFormat,
    file_target: Option<PathBuf>,
    json_file_mode: bool,
    timers: TimerRegistry,
    sink: Box<dyn ConsoleSink>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("tag", &self.tag)
            .field("minimum_level", &self.minimum_level)
            .field("date_format", &self.date_format)
            .field("file_target", &self.file_target)
            .field("json_file_mode", &self.json_file_mode)
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a logger printing to standard output, using the system clock.
    pub fn new() -> Self {
        Self::with_sink(StdConsole)
    }

    /// Creates a logger writing console output to `sink`.
    pub fn with_sink(sink: impl ConsoleSink + 'static) -> Self {
        Self {
            tag: None,
            minimum_level: Level::default(),
            date_format: DateFormat::default(),
            file_target: None,
            json_file_mode: false,
            timers: TimerRegistry::new(),
            sink: Box::new(sink),
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Builds a logger from configuration, printing to standard output.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, LoggerError> {
        let mut logger = Self::new();
        config.apply(&mut logger)?;
        Ok(logger)
    }

    /// Sets the tag shown on the next emitted line only.
    ///
    /// An empty tag clears it.
    pub fn tag(&mut self, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        self.tag = (!value.is_empty()).then_some(value);
        self
    }

    /// Sets the minimum level by catalog key (`debug`, `info`, `warn`,
    /// `error`, `success`, `timer`, `timerLap`).
    ///
    /// Unknown names are ignored and the current level is kept.
    pub fn set_level(&mut self, name: impl AsRef<str>) -> &mut Self {
        match name.as_ref().parse::<Level>() {
            Ok(level) => self.minimum_level = level,
            Err(err) => tracing::debug!(%err, "ignoring level change"),
        }
        self
    }

    /// Sets the locale and options used to render the date segment.
    ///
    /// # Errors
    ///
    /// Fails when the locale is unknown or the pattern is invalid; the
    /// previous date format stays in effect.
    pub fn set_date_locale(
        &mut self,
        locale: Option<&str>,
        options: Option<DateOptions>,
    ) -> Result<&mut Self, LoggerError> {
        self.date_format = DateFormat::new(locale, options.unwrap_or_default())?;
        Ok(self)
    }

    /// Mirrors every emission to `path`, creating its parent directory.
    ///
    /// An empty path disables file output.
    pub fn to_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, LoggerError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            self.file_target = None;
            return Ok(self);
        }
        sink::ensure_parent_dir(path)?;
        self.file_target = Some(path.to_path_buf());
        Ok(self)
    }

    /// Switches file output between text lines and JSON objects.
    pub fn as_json_file_mode(&mut self, enabled: bool) -> &mut Self {
        self.json_file_mode = enabled;
        self
    }

    pub fn minimum_level(&self) -> Level {
        self.minimum_level
    }

    pub fn current_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn file_target(&self) -> Option<&Path> {
        self.file_target.as_deref()
    }

    pub fn is_json_file_mode(&self) -> bool {
        self.json_file_mode
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn has_timer(&self, label: &str) -> bool {
        self.timers.contains(label)
    }

    /// Labels of the running timers, sorted.
    pub fn active_timers(&self) -> Vec<String> {
        self.timers.labels()
    }

    pub fn info<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Info, values)
    }

    pub fn warn<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Warn, values)
    }

    pub fn error<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Error, values)
    }

    /// Always emitted, whatever the minimum level.
    pub fn success<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Success, values)
    }

    pub fn debug<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Debug, values)
    }

    /// Emits `values` at `level` if it passes the minimum level.
    pub fn log<I>(&mut self, level: Level, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        if self.should_log(level) {
            let values: Vec<Value> = values.into_iter().map(Into::into).collect();
            self.emit(level, &values, Persist::Record);
        }
        self
    }

    /// Whether a record at `level` would be emitted.
    pub fn should_log(&self, level: Level) -> bool {
        level.passes(self.minimum_level)
    }

    /// Starts (or restarts) the timer `label`.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidArgument`] when `label` is empty.
    pub fn timer_start(&mut self, label: &str) -> Result<&mut Self, LoggerError> {
        if label.is_empty() {
            return Err(LoggerError::InvalidArgument(
                "timer label must not be empty".to_string(),
            ));
        }
        let now = self.clock.now_millis();
        self.timers.start(label, now);
        Ok(self)
    }

    /// Stops the timer `label` and emits its total duration.
    ///
    /// An unknown label produces a warning line instead.
    pub fn timer_end<I>(&mut self, label: &str, extra: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let now = self.clock.now_millis();
        match self.timers.end(label, now) {
            Some(elapsed) => self.emit_timer(Level::Timer, label, elapsed, extra),
            None => self.missing_timer(label),
        }
    }

    /// Emits the time since the timer's start or previous lap, and restarts
    /// the interval. The timer keeps running.
    pub fn timer_lap<I>(&mut self, label: &str, extra: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let now = self.clock.now_millis();
        match self.timers.lap(label, now) {
            Some(elapsed) => self.emit_timer(Level::TimerLap, label, elapsed, extra),
            None => self.missing_timer(label),
        }
    }

    fn missing_timer(&mut self, label: &str) -> &mut Self {
        self.warn([format!("Timer \"{label}\" doesn't exist.")])
    }

    fn emit_timer<I>(&mut self, level: Level, label: &str, elapsed: u64, extra: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut values = vec![Value::Text(format!(
            "[{}] {} : {}",
            level.label(),
            label,
            format_duration(elapsed)
        ))];
        values.extend(extra.into_iter().map(Into::into));

        let persist = Persist::Timer {
            label: label.to_string(),
            elapsed,
        };
        self.emit(level, &values, persist);
        self
    }

    // Renders, prints, persists, then consumes the tag.
    fn emit(&mut self, level: Level, values: &[Value], persist: Persist) {
        let now = self.clock.now();
        let tag = self.tag.take();
        let date = self.date_format.render(now);
        let line = format::render_line(&date, tag.as_deref(), level, values);

        self.sink.write_line(&format!("{}{}{}", level.color(), line, RESET));

        let Some(path) = self.file_target.as_deref() else {
            return;
        };

        let record = match persist {
            Persist::Record if self.json_file_mode => {
                serde_json::to_string(&JsonRecord::new(now, level, tag.as_deref(), values))
            }
            Persist::Record => Ok(line),
            Persist::Timer { label, elapsed } if self.json_file_mode => {
                // the first value is the rendered timer message
                let extra = values.iter().skip(1).map(Value::to_json).collect();
                serde_json::to_string(&TimerRecord {
                    timestamp: format::iso_timestamp(now),
                    level: level.label().to_string(),
                    tag,
                    timer: label,
                    duration: elapsed,
                    duration_text: format_duration(elapsed),
                    extra,
                })
            }
            Persist::Timer { .. } => return,
        };

        let result = record
            .map_err(LoggerError::from)
            .and_then(|record| sink::append_line(path, &record));

        if let Err(err) = result {
            tracing::warn!(path = %path.display(), %err, "log file append failed");
            self.sink
                .write_diagnostic(&format!("banana_logger: failed to write log file: {err}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sink::MemorySink;
    use crate::values;

    fn logger() -> (Logger, MemorySink, ManualClock) {
        let sink = MemorySink::new();
        let clock = ManualClock::default();
        let logger = Logger::with_sink(sink.clone()).with_clock(clock.clone());
        (logger, sink, clock)
    }

    #[test]
    fn test_line_is_colored() {
        let (mut logger, sink, _) = logger();
        logger.error(["boom"]);
        let line = &sink.lines()[0];
        assert!(line.starts_with(Level::Error.color()));
        assert!(line.ends_with(RESET));
        assert!(line.contains("[ERROR] boom"));
    }

    #[test]
    fn test_suppressed_emission_keeps_tag() {
        let (mut logger, sink, _) = logger();
        logger.tag("T").debug(["hidden"]);
        assert!(sink.lines().is_empty());
        assert_eq!(logger.current_tag(), Some("T"));

        logger.info(["shown"]);
        assert!(sink.lines()[0].contains("[T] [INFO] shown"));
        assert_eq!(logger.current_tag(), None);
    }

    #[test]
    fn test_empty_tag_is_no_tag() {
        let (mut logger, sink, _) = logger();
        logger.tag("").info(["x"]);
        assert!(!sink.lines()[0].contains("[]"));
    }

    #[test]
    fn test_unknown_level_ignored() {
        let (mut logger, _, _) = logger();
        logger.set_level("warn").set_level("verbose");
        assert_eq!(logger.minimum_level(), Level::Warn);
    }

    #[test]
    fn test_timer_message_and_extras() {
        let (mut logger, sink, clock) = logger();
        logger.timer_start("job").unwrap();
        clock.advance_millis(1500);
        logger.timer_end("job", values!["done", 2]);

        let line = &sink.lines()[0];
        assert!(line.starts_with(Level::Timer.color()));
        assert!(line.contains("[TIMER] [TIMER] job : 1s 500ms done 2"));
        assert!(!logger.has_timer("job"));
    }

    #[test]
    fn test_empty_timer_label_fails() {
        let (mut logger, _, _) = logger();
        assert!(matches!(
            logger.timer_start(""),
            Err(LoggerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_date_locale_failure_keeps_previous_format() {
        let (mut logger, _, _) = logger();
        logger
            .set_date_locale(None, Some(DateOptions::with_pattern("%Y")))
            .unwrap();
        assert!(logger.set_date_locale(Some("zz-ZZ"), None).is_err());
        assert_eq!(logger.date_format().options().pattern.as_deref(), Some("%Y"));
    }
}
