use timedesk::config::{Config, MAX_DURATION_SECS};
use timedesk::core::calculator::target::{daily_target, target_for};
use timedesk::models::period_stats::Period;

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let cfg = Config::from_yaml(
        "database: /tmp/td.sqlite\nwork:\n  contract_weekly_hours: 40\nsecurity:\n  session_timeout: 0\n",
    )
    .unwrap();

    assert_eq!(cfg.database, "/tmp/td.sqlite");
    assert_eq!(cfg.work.contract_weekly_hours, 40.0);
    assert_eq!(cfg.work.monthly_target_hours, 151.67);
    assert_eq!(cfg.work.max_entries_per_day, 50);
    assert_eq!(cfg.security.session_timeout, 0);
    assert_eq!(cfg.security.login_max_attempts, 5);
    assert_eq!(cfg.security.login_lock_window, 900);
    assert_eq!(cfg.security.password_reset_expiry, 3600);
    assert_eq!(cfg.password_policy.min_length, 8);
    assert_eq!(cfg.log_level, "info");

    assert_eq!(target_for(Period::Day, &cfg.work), daily_target(40.0));
    assert_eq!(target_for(Period::Week, &cfg.work), 2400);
}

#[test]
fn yaml_round_trips_through_save_format() {
    let cfg = Config::default();
    let back = Config::from_yaml(&cfg.to_yaml().unwrap()).unwrap();
    assert_eq!(back.database, cfg.database);
    assert_eq!(back.security.session_timeout, 86_400);
}

#[test]
fn check_lists_every_problem() {
    let mut cfg = Config::default();
    assert!(cfg.check().is_empty());
    assert!(cfg.ensure_valid().is_ok());

    cfg.work.contract_weekly_hours = -1.0;
    cfg.security.login_max_attempts = 0;
    cfg.password_policy.min_length = 0;

    let problems = cfg.check();
    assert_eq!(problems.len(), 3);
    assert!(cfg.ensure_valid().is_err());
}

#[test]
fn malformed_yaml_is_an_error() {
    assert!(Config::from_yaml("work: [not, a, map]").is_err());
}

#[test]
fn check_bounds_durations_from_above() {
    let mut cfg = Config::default();
    cfg.security.login_lock_window = 10_000_000_000_000;
    cfg.security.password_reset_expiry = 10_000_000_000_000;
    cfg.security.session_timeout = MAX_DURATION_SECS + 1;

    let problems = cfg.check();
    assert_eq!(problems.len(), 3);
    assert!(problems.iter().any(|p| p.contains("login_lock_window")));
    assert!(problems.iter().any(|p| p.contains("password_reset_expiry")));
    assert!(problems.iter().any(|p| p.contains("session_timeout")));

    cfg.security = Default::default();
    cfg.security.login_lock_window = MAX_DURATION_SECS;
    cfg.security.password_reset_expiry = MAX_DURATION_SECS;
    cfg.security.session_timeout = -1;
    assert!(cfg.check().is_empty());
}
