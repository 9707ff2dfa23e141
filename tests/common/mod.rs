#![allow(dead_code)]

use banana_logger::clock::ManualClock;
use banana_logger::{Level, Logger, MemorySink};
use chrono::{TimeZone, Utc};

/// Logger wired to an in-memory sink and a clock frozen at a fixed instant.
pub fn test_logger() -> (Logger, MemorySink, ManualClock) {
    let sink = MemorySink::new();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 20, 5, 0).unwrap());
    let logger = Logger::with_sink(sink.clone()).with_clock(clock.clone());
    (logger, sink, clock)
}

/// Removes the level color prefix and reset suffix from a console line.
pub fn strip_color(line: &str) -> &str {
    let body = line.strip_suffix(banana_logger::level::RESET).unwrap_or(line);
    Level::ALL
        .iter()
        .find_map(|level| body.strip_prefix(level.color()))
        .unwrap_or(body)
}
