use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// ANSI escape that restores the default terminal color.
pub const RESET: &str = "\x1b[0m";

/// Severity catalog.
///
/// Only `Debug`, `Info`, `Warn` and `Error` take part in level filtering.
/// `Success`, `Timer` and `TimerLap` are decorative: they carry a label and a
/// color but no rank, so they are always emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Success,
    Timer,
    TimerLap,
}

impl Level {
    /// Every level of the catalog, ranked levels first.
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Success,
        Level::Timer,
        Level::TimerLap,
    ];

    /// Uppercase label shown between brackets in rendered lines.
    pub const fn label(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Success => "SUCCESS",
            Level::Timer => "TIMER",
            Level::TimerLap => "TIMER LAP",
        }
    }

    /// ANSI color prefix for console output.
    pub const fn color(self) -> &'static str {
        match self {
            Level::Debug => "\x1b[35m",    // magenta
            Level::Info => "\x1b[36m",     // cyan
            Level::Warn => "\x1b[33m",     // yellow
            Level::Error => "\x1b[31m",    // red
            Level::Success => "\x1b[32m",  // green
            Level::Timer => "\x1b[34m",    // blue
            Level::TimerLap => "\x1b[94m", // bright blue
        }
    }

    /// Position in the filter order, `None` for decorative levels.
    pub const fn rank(self) -> Option<u8> {
        match self {
            Level::Debug => Some(0),
            Level::Info => Some(1),
            Level::Warn => Some(2),
            Level::Error => Some(3),
            Level::Success | Level::Timer | Level::TimerLap => None,
        }
    }

    /// Catalog key, as accepted by [`Level::from_str`].
    pub const fn key(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Success => "success",
            Level::Timer => "timer",
            Level::TimerLap => "timerLap",
        }
    }

    /// Whether a record at `self` passes a logger whose minimum is `minimum`.
    ///
    /// Unranked levels always pass, and so does everything once the minimum
    /// itself is unranked.
    pub fn passes(self, minimum: Level) -> bool {
        match (self.rank(), minimum.rank()) {
            (Some(rank), Some(min)) => rank >= min,
            _ => true,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown level `{}`", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_filtering() {
        let ranked = [Level::Debug, Level::Info, Level::Warn, Level::Error];
        for (i, minimum) in ranked.iter().enumerate() {
            for (j, level) in ranked.iter().enumerate() {
                assert_eq!(level.passes(*minimum), j >= i, "{level:?} vs {minimum:?}");
            }
        }
    }

    #[test]
    fn test_decorative_levels_always_pass() {
        for level in [Level::Success, Level::Timer, Level::TimerLap] {
            assert!(level.passes(Level::Error));
            assert!(level.rank().is_none());
        }
        // unranked minimum lets everything through
        assert!(Level::Debug.passes(Level::Success));
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("warn".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("WARN".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("timerLap".parse::<Level>(), Ok(Level::TimerLap));
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
        assert_eq!(Level::from(log::Level::Error), Level::Error);
        assert_eq!(Level::from(log::Level::Warn), Level::Warn);
    }
}
