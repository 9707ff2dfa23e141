//! Logger configuration.
//!
//! A [`LoggerConfig`] is plain data: it can be written by hand, loaded from a
//! JSON file and overridden from the environment, then applied to a
//! [`Logger`].
//!
//! ```json
//! {
//!   "level": "debug",
//!   "file": "logs/app.log",
//!   "json_file_mode": true,
//!   "date_locale": "en-GB",
//!   "date_options": { "pattern": "%d/%m/%Y %H:%M:%S", "utc": false }
//! }
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;
use crate::format::DateOptions;
use crate::logger::Logger;

/// Overrides the minimum level.
pub const ENV_LEVEL: &str = "BANANA_LOG_LEVEL";
/// Overrides the file target; an empty value disables file output.
pub const ENV_FILE: &str = "BANANA_LOG_FILE";
/// Overrides JSON file mode (`1`/`true`/`yes`/`on` enable it).
pub const ENV_JSON: &str = "BANANA_LOG_JSON";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level key; unknown names are ignored when applied.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
    pub json_file_mode: bool,
    pub date_locale: Option<String>,
    pub date_options: Option<DateOptions>,
}

impl LoggerConfig {
    /// Reads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoggerError::io(path, e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, LoggerError> {
        serde_json::from_str(content).map_err(|e| LoggerError::Config(e.to_string()))
    }

    /// Applies the `BANANA_LOG_*` environment variables on top of `self`.
    pub fn apply_env(mut self) -> Self {
        self.merge_vars(|key| env::var(key).ok());
        self
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(level) = var(ENV_LEVEL) {
            self.level = Some(level);
        }
        if let Some(file) = var(ENV_FILE) {
            self.file = (!file.is_empty()).then(|| PathBuf::from(file));
        }
        if let Some(json) = var(ENV_JSON) {
            self.json_file_mode = matches!(
                json.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Configures `logger` from `self`.
    ///
    /// The date format and file target are validated first; on error the
    /// logger may be left partially configured.
    pub fn apply(&self, logger: &mut Logger) -> Result<(), LoggerError> {
        if let Some(level) = &self.level {
            logger.set_level(level);
        }
        if self.date_locale.is_some() || self.date_options.is_some() {
            logger.set_date_locale(self.date_locale.as_deref(), self.date_options.clone())?;
        }
        if let Some(file) = &self.file {
            logger.to_file(file)?;
        }
        logger.as_json_file_mode(self.json_file_mode);
        Ok(())
    }
}
