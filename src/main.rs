use std::env;
use std::fs;
use std::thread;
use std::time::Duration;

use banana_logger::{values, DateOptions, Logger, LoggerConfig, LoggerError, Value};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "./logs/banana-demo.log";

/// Walks through every logger feature, then prints the resulting log file.
///
/// Usage: `banana_logger [log-file]`. `RUST_LOG=banana_logger=debug` shows the
/// logger's own diagnostics.
fn main() -> Result<(), LoggerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let log_file = env::args().nth(1).unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    let _ = fs::remove_file(&log_file);

    let config = LoggerConfig::default().apply_env();
    let mut logger = Logger::from_config(&config)?;

    // Console
    logger.info(["This is an info line"]);
    logger.warn(["This is a warning"]);
    logger.error(["This is an error"]);
    logger.success(["All good"]);
    logger.debug(["Only visible at debug level"]);

    // Tags
    logger.tag("AUTH").info(["User connected"]);
    logger.tag("API").warn(["Missing parameter"]);

    // Level filtering
    logger.set_level("warn");
    logger.info(["Not shown"]);
    logger.warn(["Shown"]);
    logger.set_level("debug");

    // Date locale
    logger.set_date_locale(Some("en-GB"), None)?;
    logger.info(["Date in British English"]);
    logger.set_date_locale(None, Some(DateOptions::with_pattern("%Y-%m-%d %H:%M:%S")))?;

    // Plain text file
    logger.to_file(&log_file)?;
    logger.info(["This line also goes to the file"]);

    // JSON file
    logger.as_json_file_mode(true);
    let failure = std::io::Error::other("upstream unavailable");
    logger
        .tag("TEST")
        .error(values!["JSON error", json!({ "foo": 123 }), Value::error(&failure)]);
    logger.info(["This is a JSON line"]);

    // Timers
    logger.timer_start("process")?;
    thread::sleep(Duration::from_millis(500));
    logger.timer_lap("process", ["First lap"]);
    thread::sleep(Duration::from_millis(500));
    logger.timer_end("process", ["Timer finished"]);
    logger.timer_end("process", values![]);

    let content = fs::read_to_string(&log_file).map_err(|e| LoggerError::Io {
        path: log_file.clone().into(),
        source: e,
    })?;
    logger.to_file("")?;
    logger.info(["Log file contents:"]);
    for line in content.lines() {
        logger.debug([line]);
    }

    Ok(())
}
