use std::collections::HashMap;

/// Registry of running timers.
///
/// Maps a label to the instant (milliseconds since the epoch) it was started
/// or last lapped. Labels are unique: starting a label twice restarts it.
#[derive(Debug, Default, Clone)]
pub struct TimerRegistry {
    started: HashMap<String, i64>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `now` under `label`, replacing any earlier start.
    pub fn start(&mut self, label: &str, now: i64) {
        self.started.insert(label.to_string(), now);
    }

    /// Elapsed time since the last recorded instant, restarting the interval.
    ///
    /// Returns `None` when no timer runs under `label`.
    pub fn lap(&mut self, label: &str, now: i64) -> Option<u64> {
        let last = self.started.get_mut(label)?;
        let elapsed = elapsed_millis(*last, now);
        *last = now;
        Some(elapsed)
    }

    /// Elapsed time since the last recorded instant, removing the timer.
    pub fn end(&mut self, label: &str, now: i64) -> Option<u64> {
        self.started
            .remove(label)
            .map(|start| elapsed_millis(start, now))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.started.contains_key(label)
    }

    /// Labels of every running timer, sorted.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.started.keys().cloned().collect();
        labels.sort();
        labels
    }

    pub fn len(&self) -> usize {
        self.started.len()
    }

    pub fn is_empty(&self) -> bool {
        self.started.is_empty()
    }
}

// A clock stepping backwards yields zero rather than a negative duration.
fn elapsed_millis(start: i64, now: i64) -> u64 {
    u64::try_from(now.saturating_sub(start)).unwrap_or(0)
}

/// Formats a duration in milliseconds for timer messages.
///
/// Below one second the value is shown in milliseconds; above it in whole
/// seconds, with the remainder appended only when non-zero.
///
/// # Examples
///
/// ```
/// # use banana_logger::timer::format_duration;
/// assert_eq!(format_duration(999), "999ms");
/// assert_eq!(format_duration(1000), "1s");
/// assert_eq!(format_duration(2500), "2s 500ms");
/// ```
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        return format!("{ms}ms");
    }
    let seconds = ms / 1000;
    match ms % 1000 {
        0 => format!("{seconds}s"),
        rem => format!("{seconds}s {rem}ms"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(999), "999ms");
        assert_eq!(format_duration(1000), "1s");
        assert_eq!(format_duration(1500), "1s 500ms");
        assert_eq!(format_duration(3000), "3s");
        assert_eq!(format_duration(61_001), "61s 1ms");
    }

    #[test]
    fn test_lap_resets_interval() {
        let mut timers = TimerRegistry::new();
        timers.start("job", 100);
        assert_eq!(timers.lap("job", 350), Some(250));
        assert_eq!(timers.lap("job", 400), Some(50));
        assert!(timers.contains("job"));
        assert_eq!(timers.end("job", 1400), Some(1000));
        assert!(!timers.contains("job"));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_missing_label() {
        let mut timers = TimerRegistry::new();
        assert_eq!(timers.lap("nope", 10), None);
        assert_eq!(timers.end("nope", 10), None);
    }

    #[test]
    fn test_restart_overwrites() {
        let mut timers = TimerRegistry::new();
        timers.start("a", 0);
        timers.start("a", 500);
        timers.start("b", 0);
        assert_eq!(timers.len(), 2);
        assert_eq!(timers.labels(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(timers.end("a", 700), Some(200));
    }

    #[test]
    fn test_clock_going_backwards_saturates() {
        let mut timers = TimerRegistry::new();
        timers.start("a", 1000);
        assert_eq!(timers.end("a", 900), Some(0));
    }
}
