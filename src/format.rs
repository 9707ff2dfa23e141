//! Rendering of dates, console lines and JSON file records.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Locale, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LoggerError;
use crate::level::Level;
use crate::value::Value;

/// Long-form local date-time used when no locale is configured,
/// e.g. `10/16/2026, 8:05:00 PM`.
pub const DEFAULT_PATTERN: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Pattern used with a locale and no explicit pattern: the locale's own
/// date-time representation.
pub const LOCALE_PATTERN: &str = "%c";

/// Options for date rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOptions {
    /// strftime pattern, overriding the default or locale pattern.
    pub pattern: Option<String>,
    /// Render in UTC instead of the local time zone.
    pub utc: bool,
}

impl DateOptions {
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }
}

/// Resolved date rendering settings.
#[derive(Debug, Clone, Default)]
pub struct DateFormat {
    locale: Option<Locale>,
    options: DateOptions,
}

impl DateFormat {
    /// Resolves a locale name and options.
    ///
    /// Locale names are accepted in BCP 47 (`en-GB`) or POSIX (`en_GB`)
    /// spelling; a bare language such as `fr` resolves to `fr_FR`.
    ///
    /// # Errors
    ///
    /// * [`LoggerError::UnknownLocale`] when the locale is not known
    /// * [`LoggerError::InvalidDatePattern`] when the pattern does not parse
    pub fn new(locale: Option<&str>, options: DateOptions) -> Result<Self, LoggerError> {
        let locale = locale
            .filter(|name| !name.trim().is_empty())
            .map(parse_locale)
            .transpose()?;

        if let Some(pattern) = &options.pattern {
            validate_pattern(pattern)?;
        }

        Ok(Self { locale, options })
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    pub fn options(&self) -> &DateOptions {
        &self.options
    }

    fn pattern(&self) -> &str {
        match (&self.options.pattern, self.locale) {
            (Some(pattern), _) => pattern,
            (None, Some(_)) => LOCALE_PATTERN,
            (None, None) => DEFAULT_PATTERN,
        }
    }

    /// Renders `at` for the bracketed date segment.
    pub fn render(&self, at: DateTime<Utc>) -> String {
        if self.options.utc {
            self.render_in(at)
        } else {
            self.render_in(at.with_timezone(&Local))
        }
    }

    fn render_in<Tz: TimeZone>(&self, at: DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        let pattern = self.pattern();
        match self.locale {
            Some(locale) => at.format_localized(pattern, locale).to_string(),
            None => at.format(pattern).to_string(),
        }
    }
}

fn parse_locale(name: &str) -> Result<Locale, LoggerError> {
    let normalized = name.trim().replace('-', "_");
    if let Ok(locale) = Locale::try_from(normalized.as_str()) {
        return Ok(locale);
    }
    if !normalized.contains('_') {
        let regional = format!("{}_{}", normalized, normalized.to_ascii_uppercase());
        if let Ok(locale) = Locale::try_from(regional.as_str()) {
            return Ok(locale);
        }
    }
    Err(LoggerError::UnknownLocale(name.to_string()))
}

// Formatting an unparsable pattern fails at display time, so reject it early.
fn validate_pattern(pattern: &str) -> Result<(), LoggerError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::InvalidDatePattern(pattern.to_string()));
    }
    Ok(())
}

/// ISO-8601 instant with millisecond precision, e.g. `2026-10-16T20:05:00.123Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Joins the bracketed segments and rendered values of one record.
pub fn render_line(date: &str, tag: Option<&str>, level: Level, values: &[Value]) -> String {
    let mut parts = Vec::with_capacity(values.len() + 3);
    parts.push(format!("[{date}]"));
    if let Some(tag) = tag {
        parts.push(format!("[{tag}]"));
    }
    parts.push(format!("[{}]", level.label()));
    parts.extend(values.iter().map(Value::render_text));
    parts.join(" ")
}

/// One line of a JSON-mode log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub timestamp: String,
    pub level: String,
    pub tag: Option<String>,
    pub message: Vec<serde_json::Value>,
}

impl JsonRecord {
    pub fn new(at: DateTime<Utc>, level: Level, tag: Option<&str>, values: &[Value]) -> Self {
        Self {
            timestamp: iso_timestamp(at),
            level: level.label().to_string(),
            tag: tag.map(str::to_string),
            message: values.iter().map(Value::to_json).collect(),
        }
    }
}

/// JSON line persisted by `timer_end` and `timer_lap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub timestamp: String,
    pub level: String,
    pub tag: Option<String>,
    pub timer: String,
    /// Elapsed milliseconds.
    pub duration: u64,
    pub duration_text: String,
    pub extra: Vec<serde_json::Value>,
}
