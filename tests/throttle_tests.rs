mod common;

use chrono::Duration;
use common::{memory_pool, ts};
use timedesk::config::SecurityConfig;
use timedesk::core::throttle::LoginThrottle;
use timedesk::errors::AppError;

fn throttle() -> LoginThrottle {
    LoginThrottle::new(5, 900)
}

#[test]
fn locks_after_max_failures_and_unlocks_when_window_passes() {
    let pool = memory_pool();
    let th = throttle();
    let start = ts("2024-11-25 10:00:00");

    for i in 0..4 {
        th.record_attempt(&pool, "alice", "10.0.0.1", false, start + Duration::seconds(i))
            .unwrap();
    }
    assert!(!th.is_locked(&pool, "alice", "10.0.0.1", start + Duration::seconds(10)).unwrap());

    th.record_attempt(&pool, "alice", "10.0.0.1", false, start + Duration::seconds(4))
        .unwrap();
    assert!(th.is_locked(&pool, "alice", "10.0.0.1", start + Duration::seconds(10)).unwrap());

    // a sixth failure after the window has aged out the first five
    let later = start + Duration::seconds(901 + 4);
    th.record_attempt(&pool, "alice", "10.0.0.1", false, later).unwrap();
    assert!(!th.is_locked(&pool, "alice", "10.0.0.1", later).unwrap());
}

#[test]
fn failures_count_per_username_or_address() {
    let pool = memory_pool();
    let th = throttle();
    let now = ts("2024-11-25 10:00:00");

    // one address spraying many usernames
    for name in ["a1", "a2", "a3", "a4", "a5"] {
        th.record_attempt(&pool, name, "192.168.1.9", false, now).unwrap();
    }
    assert!(th.is_locked(&pool, "someone_else", "192.168.1.9", now).unwrap());

    // one username from many addresses
    for ip in ["1.1.1.1", "2.2.2.2", "3.3.3.3", "4.4.4.4", "5.5.5.5"] {
        th.record_attempt(&pool, "carol", ip, false, now).unwrap();
    }
    assert!(th.is_locked(&pool, "carol", "9.9.9.9", now).unwrap());

    assert!(!th.is_locked(&pool, "dave", "8.8.8.8", now).unwrap());
}

#[test]
fn success_does_not_clear_failures() {
    let pool = memory_pool();
    let th = throttle();
    let now = ts("2024-11-25 10:00:00");

    for _ in 0..5 {
        th.record_attempt(&pool, "erin", "10.0.0.2", false, now).unwrap();
    }
    th.record_attempt(&pool, "erin", "10.0.0.2", true, now).unwrap();

    assert!(th.is_locked(&pool, "erin", "10.0.0.2", now).unwrap());
    assert_eq!(th.failures_in_window(&pool, "erin", "10.0.0.2", now).unwrap(), 5);
}

#[test]
fn window_lower_bound_is_inclusive() {
    let pool = memory_pool();
    let th = LoginThrottle::new(1, 60);
    let failed_at = ts("2024-11-25 10:00:00");
    th.record_attempt(&pool, "frank", "10.0.0.3", false, failed_at).unwrap();

    assert!(th.is_locked(&pool, "frank", "10.0.0.3", failed_at + Duration::seconds(60)).unwrap());
    assert!(!th.is_locked(&pool, "frank", "10.0.0.3", failed_at + Duration::seconds(61)).unwrap());
}

#[test]
fn every_attempt_is_appended() {
    let pool = memory_pool();
    let th = LoginThrottle::from_config(&SecurityConfig::default());
    let now = ts("2024-11-25 10:00:00");

    th.record_attempt(&pool, "gina", "10.0.0.4", false, now).unwrap();
    th.record_attempt(&pool, "gina", "10.0.0.4", true, now + Duration::seconds(5)).unwrap();

    let rows = LoginThrottle::recent_attempts(&pool, 10).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].success);
    assert!(!rows[1].success);
}

#[test]
fn oversized_window_is_an_error_not_a_panic() {
    let pool = memory_pool();
    let th = LoginThrottle::new(5, 10_000_000_000_000);
    let now = ts("2024-11-25 10:00:00");

    assert!(matches!(
        th.is_locked(&pool, "gina", "10.0.0.4", now),
        Err(AppError::Config(_))
    ));
}
