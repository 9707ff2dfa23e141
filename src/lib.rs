//! # Banana Logger
//!
//! A small decorative logger for terminal programs:
//!
//! * **Readable console output**: every line is timestamped, tagged and colored by level
//! * **File mirroring**: lines can be appended to a file as plain text or JSON objects
//! * **Timers**: start, lap and end named timers with human-readable durations
//!
//! ## Main Components
//!
//! * `Logger`: fluent configuration and emission API, one per logical logger
//! * `Level`: severity catalog; `success` and timer levels bypass filtering
//! * `Value`: the closed set of argument kinds a line can carry
//! * `SharedLogger`: thread-safe handle, also usable as the `log` crate backend
//! * `LoggerConfig`: serde-backed configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```
//! use banana_logger::{values, Logger};
//! use serde_json::json;
//!
//! let mut logger = Logger::new();
//!
//! logger.info(["Server started"]);
//! logger.tag("AUTH").warn(["Missing parameter"]);
//! logger.error(values!["Request failed", json!({ "status": 500 })]);
//!
//! logger.timer_start("process").unwrap();
//! logger.timer_end("process", ["Done"]);
//! ```

pub mod bridge;
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod sink;
pub mod timer;
pub mod value;

pub use bridge::{LogBridge, SharedLogger};
pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::{DateFormat, DateOptions};
pub use level::Level;
pub use logger::Logger;
pub use sink::{ConsoleSink, MemorySink, StdConsole};
pub use value::Value;
