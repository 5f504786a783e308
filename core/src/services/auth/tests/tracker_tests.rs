//! Login attempt tracker tests.
//!
//! Time-dependent behavior is driven through the `*_at` variants, so no test
//! sleeps.

use chrono::{Duration, Utc};

use crate::services::auth::LoginAttemptTracker;

const ADDR: &str = "203.0.113.7";
const PHONE: &str = "0912345678";

#[test]
fn test_first_two_failures_do_not_lock() {
    let tracker = LoginAttemptTracker::with_defaults();

    let first = tracker.record_failure(ADDR, PHONE);
    assert_eq!(first.remaining_attempts, 4);
    assert_eq!(first.lock_minutes, None);

    let second = tracker.record_failure(ADDR, PHONE);
    assert_eq!(second.remaining_attempts, 3);
    assert_eq!(second.lock_minutes, None);

    assert!(!tracker.is_locked(ADDR, PHONE));
    assert_eq!(tracker.failure_count(ADDR, PHONE), 2);
}

#[test]
fn test_escalating_lock_durations() {
    let tracker = LoginAttemptTracker::with_defaults();
    let now = Utc::now();

    tracker.record_failure_at(ADDR, PHONE, now);
    tracker.record_failure_at(ADDR, PHONE, now);
    let third = tracker.record_failure_at(ADDR, PHONE, now);
    assert_eq!(third.lock_minutes, Some(2));
    assert!(tracker.is_locked_at(ADDR, PHONE, now));

    // The short lock lapses and discards the entry, so the next failure
    // starts a fresh count
    let after_short = now + Duration::minutes(3);
    assert!(!tracker.is_locked_at(ADDR, PHONE, after_short));
    let fresh = tracker.record_failure_at(ADDR, PHONE, after_short);
    assert_eq!(fresh.remaining_attempts, 4);
    assert_eq!(fresh.lock_minutes, None);
}

#[test]
fn test_fourth_and_fifth_failure_thresholds() {
    let tracker = LoginAttemptTracker::with_defaults();
    let now = Utc::now();

    for _ in 0..3 {
        tracker.record_failure_at(ADDR, PHONE, now);
    }
    // Still within the 2-minute lock: failures keep counting up
    let fourth = tracker.record_failure_at(ADDR, PHONE, now + Duration::seconds(30));
    assert_eq!(fourth.lock_minutes, Some(5));

    let fifth = tracker.record_failure_at(ADDR, PHONE, now + Duration::seconds(60));
    assert_eq!(fifth.lock_minutes, Some(30));
    assert_eq!(fifth.remaining_attempts, 0);

    // Every failure past the fifth re-locks for 30 minutes
    let sixth = tracker.record_failure_at(ADDR, PHONE, now + Duration::seconds(90));
    assert_eq!(sixth.lock_minutes, Some(30));
    assert_eq!(sixth.remaining_attempts, 0);
}

#[test]
fn test_long_lock_expires_after_31_minutes() {
    let tracker = LoginAttemptTracker::with_defaults();
    let now = Utc::now();

    for _ in 0..5 {
        tracker.record_failure_at(ADDR, PHONE, now);
    }
    assert!(tracker.is_locked_at(ADDR, PHONE, now + Duration::minutes(29)));
    assert!(!tracker.is_locked_at(ADDR, PHONE, now + Duration::minutes(31)));
    // The lapsed lock discarded the entry entirely
    assert_eq!(tracker.failure_count_at(ADDR, PHONE, now + Duration::minutes(31)), 0);
}

#[test]
fn test_window_expiry_resets_count() {
    let tracker = LoginAttemptTracker::with_defaults();
    let now = Utc::now();

    tracker.record_failure_at(ADDR, PHONE, now);
    tracker.record_failure_at(ADDR, PHONE, now);

    let next_day = now + Duration::hours(25);
    assert_eq!(tracker.failure_count_at(ADDR, PHONE, next_day), 0);
    let info = tracker.record_failure_at(ADDR, PHONE, next_day);
    assert_eq!(info.remaining_attempts, 4);
}

#[test]
fn test_reset_clears_state() {
    let tracker = LoginAttemptTracker::with_defaults();
    for _ in 0..4 {
        tracker.record_failure(ADDR, PHONE);
    }
    assert!(tracker.is_locked(ADDR, PHONE));

    tracker.reset(ADDR, PHONE);
    assert!(!tracker.is_locked(ADDR, PHONE));
    assert_eq!(tracker.failure_count(ADDR, PHONE), 0);
    assert_eq!(tracker.tracked_pairs(), 0);
}

#[test]
fn test_pairs_are_tracked_independently() {
    let tracker = LoginAttemptTracker::with_defaults();
    let now = Utc::now();

    for _ in 0..3 {
        tracker.record_failure_at(ADDR, PHONE, now);
    }
    assert!(tracker.is_locked_at(ADDR, PHONE, now));
    // Same account from another address, and another account from the same
    // address, are unaffected
    assert!(!tracker.is_locked_at("198.51.100.9", PHONE, now));
    assert!(!tracker.is_locked_at(ADDR, "0987654321", now));
}

#[test]
fn test_locked_for_reports_remaining_time() {
    let tracker = LoginAttemptTracker::with_defaults();
    let now = Utc::now();

    for _ in 0..3 {
        tracker.record_failure_at(ADDR, PHONE, now);
    }
    let remaining = tracker
        .locked_for_at(ADDR, PHONE, now + Duration::seconds(30))
        .unwrap();
    assert_eq!(remaining, Duration::seconds(90));
}

#[test]
fn test_sweep_drops_stale_entries() {
    let tracker = LoginAttemptTracker::with_defaults();
    let now = Utc::now();

    tracker.record_failure_at(ADDR, "0911111111", now - Duration::hours(25));
    for _ in 0..3 {
        tracker.record_failure_at(ADDR, "0922222222", now - Duration::minutes(10));
    }
    tracker.record_failure_at(ADDR, "0933333333", now);

    // One entry past its window, one with a lapsed 2-minute lock
    let removed = tracker.sweep_at(now);
    assert_eq!(removed, 2);
    assert_eq!(tracker.tracked_pairs(), 1);
}
