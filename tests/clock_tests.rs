use banana_logger::clock::{Clock, ManualClock, SystemClock};
use chrono::{TimeZone, Utc};
use std::thread;
use std::time::Duration;

#[test]
fn test_system_clock_monotonic_enough() {
    let clock = SystemClock;
    let mut prev = clock.now_millis();
    for _ in 0..1000 {
        let current = clock.now_millis();
        assert!(current >= prev - 1000, "wall clock jumped backwards");
        prev = current;
    }
}

#[test]
fn test_system_clock_advances() {
    let clock = SystemClock;
    let first = clock.now();
    thread::sleep(Duration::from_millis(5));
    let second = clock.now();
    assert!(second > first, "Current time should increase over time");
}

#[test]
fn test_manual_clock_starts_at_epoch() {
    let clock = ManualClock::default();
    assert_eq!(clock.now_millis(), 0);
}

#[test]
fn test_manual_clock_advance_and_set() {
    let clock = ManualClock::default();
    clock.advance_millis(250);
    clock.advance_millis(750);
    assert_eq!(clock.now_millis(), 1000);

    let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    clock.set(at);
    assert_eq!(clock.now(), at);
}

#[test]
fn test_manual_clock_shared_across_threads() {
    let clock = ManualClock::default();
    let clone = clock.clone();

    let handle = thread::spawn(move || {
        for _ in 0..100 {
            clone.advance_millis(1);
        }
    });
    for _ in 0..100 {
        clock.advance_millis(1);
    }
    handle.join().unwrap();

    assert_eq!(clock.now_millis(), 200);
}
