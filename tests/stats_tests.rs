mod common;

use chrono::{NaiveDate, NaiveTime};
use common::{memory_pool, seed_user, ts};
use timedesk::config::WorkConfig;
use timedesk::core::calculator::aggregate::{aggregate, daily_average};
use timedesk::core::calculator::target::{
    daily_target, enrich, monthly_target, percentage, weekly_target, yearly_target,
};
use timedesk::core::entries::EntryLogic;
use timedesk::core::stats::{StatsLogic, period_bounds};
use timedesk::models::category::EntryCategory;
use timedesk::models::entry::{EntryInput, TimeEntry};
use timedesk::models::period_stats::{Period, PeriodTotals};
use timedesk::models::user::Role;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry(id: i64, user_id: i64, date: &str, start: &str, end: &str, category: EntryCategory) -> TimeEntry {
    TimeEntry {
        id,
        user_id,
        date: d(date),
        start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        category,
        description: String::new(),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn input(date: &str, start: &str, end: &str, kind: &str) -> EntryInput {
    EntryInput {
        date: date.into(),
        start_time: start.into(),
        end_time: end.into(),
        category: kind.into(),
        description: String::new(),
    }
}

fn sample_day() -> Vec<TimeEntry> {
    vec![
        entry(1, 1, "2024-11-25", "09:00", "12:00", EntryCategory::Work),
        entry(2, 1, "2024-11-25", "12:00", "12:30", EntryCategory::Break),
        entry(3, 1, "2024-11-25", "13:00", "17:00", EntryCategory::Work),
    ]
}

#[test]
fn empty_input_gives_zero_totals() {
    let totals = aggregate(&[], d("2024-11-01"), d("2024-11-30"), None);
    assert_eq!(totals, PeriodTotals::default());
    assert!(totals.by_day.is_empty());
}

#[test]
fn end_to_end_single_day() {
    let day = d("2024-11-25");
    let totals = aggregate(&sample_day(), day, day, Some(1));

    assert_eq!(totals.work_minutes, 420);
    assert_eq!(totals.break_minutes, 30);
    assert_eq!(totals.net_minutes, 420);
    assert_eq!(totals.by_day.get(&day), Some(&420));

    let stats = enrich(totals, day, day, daily_target(35.0));
    assert_eq!(stats.target_minutes, 420);
    assert_eq!(stats.delta_minutes, 0);
    assert_eq!(stats.percentage, 100);
}

#[test]
fn course_counts_toward_net_and_by_day() {
    let entries = vec![
        entry(1, 1, "2024-11-26", "09:00", "11:00", EntryCategory::Work),
        entry(2, 1, "2024-11-26", "14:00", "15:30", EntryCategory::Course),
    ];
    let totals = aggregate(&entries, d("2024-11-26"), d("2024-11-26"), None);
    assert_eq!(totals.work_minutes, 120);
    assert_eq!(totals.course_minutes, 90);
    assert_eq!(totals.net_minutes, 210);
    assert_eq!(totals.by_day.get(&d("2024-11-26")), Some(&210));
}

#[test]
fn aggregation_is_additive() {
    let a = sample_day();
    let b = vec![
        entry(4, 1, "2024-11-26", "08:00", "10:00", EntryCategory::Work),
        entry(5, 1, "2024-11-27", "22:00", "02:00", EntryCategory::Course),
    ];
    let (from, to) = (d("2024-11-25"), d("2024-11-30"));

    let ta = aggregate(&a, from, to, None);
    let tb = aggregate(&b, from, to, None);
    let joined: Vec<TimeEntry> = a.iter().chain(b.iter()).cloned().collect();
    let tab = aggregate(&joined, from, to, None);

    assert_eq!(tab.work_minutes, ta.work_minutes + tb.work_minutes);
    assert_eq!(tab.break_minutes, ta.break_minutes + tb.break_minutes);
    assert_eq!(tab.course_minutes, ta.course_minutes + tb.course_minutes);
    assert_eq!(tab.net_minutes, ta.net_minutes + tb.net_minutes);
    assert_eq!(tab.by_day.len(), 3);
}

#[test]
fn aggregation_is_idempotent() {
    let entries = sample_day();
    let first = aggregate(&entries, d("2024-11-01"), d("2024-11-30"), None);
    let second = aggregate(&entries, d("2024-11-01"), d("2024-11-30"), None);
    assert_eq!(first, second);
}

#[test]
fn entries_outside_range_or_owner_are_ignored() {
    let entries = vec![
        entry(1, 1, "2024-11-24", "09:00", "10:00", EntryCategory::Work),
        entry(2, 1, "2024-11-25", "09:00", "10:00", EntryCategory::Work),
        entry(3, 2, "2024-11-25", "09:00", "12:00", EntryCategory::Work),
        entry(4, 1, "2024-12-01", "09:00", "10:00", EntryCategory::Work),
        entry(5, 1, "2024-12-02", "09:00", "10:00", EntryCategory::Work),
    ];
    let totals = aggregate(&entries, d("2024-11-25"), d("2024-12-01"), Some(1));
    // both bounds are inclusive
    assert_eq!(totals.work_minutes, 120);
    assert_eq!(totals.by_day.len(), 2);

    let everyone = aggregate(&entries, d("2024-11-25"), d("2024-12-01"), None);
    assert_eq!(everyone.work_minutes, 300);
}

#[test]
fn percentage_is_capped_while_delta_stays_positive() {
    let day = d("2024-11-25");
    let mut entries = sample_day();
    entries.push(entry(9, 1, "2024-11-25", "17:00", "19:00", EntryCategory::Work));

    let stats = enrich(aggregate(&entries, day, day, None), day, day, 420);
    assert_eq!(stats.net_minutes, 540);
    assert_eq!(stats.delta_minutes, 120);
    assert_eq!(stats.percentage, 100);
}

#[test]
fn zero_target_never_divides() {
    assert_eq!(percentage(300, 0), 0);
    assert_eq!(percentage(0, 0), 0);

    let day = d("2024-11-25");
    let stats = enrich(aggregate(&sample_day(), day, day, None), day, day, 0);
    assert_eq!(stats.percentage, 0);
    assert_eq!(stats.delta_minutes, 420);
}

#[test]
fn percentage_rounds_to_nearest() {
    assert_eq!(percentage(210, 420), 50);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
}

#[test]
fn targets_follow_contract_hours() {
    assert_eq!(daily_target(35.0), 420);
    assert_eq!(weekly_target(35.0), 2100);
    assert_eq!(monthly_target(151.67), 9100);
    assert_eq!(yearly_target(151.67), 109_202);
    assert_eq!(daily_target(0.0), 0);
}

#[test]
fn daily_average_divides_by_recorded_days() {
    let mut totals = PeriodTotals::default();
    assert_eq!(daily_average(&totals), 0);

    totals.net_minutes = 900;
    totals.by_day.insert(d("2024-11-25"), 420);
    totals.by_day.insert(d("2024-11-26"), 480);
    assert_eq!(daily_average(&totals), 450);
}

#[test]
fn zero_length_work_day_counts_toward_average() {
    let entries = vec![
        entry(1, 1, "2024-11-25", "09:00", "17:00", EntryCategory::Work),
        entry(2, 1, "2024-11-26", "10:00", "10:00", EntryCategory::Work),
    ];
    let totals = aggregate(&entries, d("2024-11-25"), d("2024-11-26"), None);

    assert_eq!(totals.by_day.len(), 2);
    assert_eq!(totals.by_day[&d("2024-11-26")], 0);
    assert_eq!(totals.net_minutes, 480);
    assert_eq!(daily_average(&totals), 240);
}

#[test]
fn period_bounds_cover_calendar_units() {
    let wed = d("2024-11-27");
    assert_eq!(period_bounds(Period::Day, wed), (wed, wed));
    assert_eq!(period_bounds(Period::Week, wed), (d("2024-11-25"), d("2024-12-01")));
    assert_eq!(period_bounds(Period::Month, wed), (d("2024-11-01"), d("2024-11-30")));
    assert_eq!(period_bounds(Period::Year, wed), (d("2024-01-01"), d("2024-12-31")));
}

#[test]
fn stats_from_stored_entries() {
    let pool = memory_pool();
    let alice = seed_user(&pool, "alice", Role::User);
    let bob = seed_user(&pool, "bob", Role::User);
    let work = WorkConfig::default();
    let now = ts("2024-11-25 18:00:00");

    for (date, start, end, kind) in [
        ("2024-11-25", "09:00", "12:00", "work"),
        ("2024-11-25", "12:00", "12:30", "break"),
        ("2024-11-25", "13:00", "17:00", "work"),
        ("2024-11-27", "09:00", "11:00", "course"),
    ] {
        EntryLogic::create(&pool, &work, &alice, &input(date, start, end, kind), now).unwrap();
    }
    EntryLogic::create(&pool, &work, &bob, &input("2024-11-25", "08:00", "16:00", "work"), now).unwrap();

    let day = StatsLogic::daily(&pool, &work, d("2024-11-25"), Some(alice.id)).unwrap();
    assert_eq!(day.work_minutes, 420);
    assert_eq!(day.break_minutes, 30);
    assert_eq!(day.net_minutes, 420);
    assert_eq!(day.delta_minutes, 0);
    assert_eq!(day.percentage, 100);

    let week = StatsLogic::weekly(&pool, &work, d("2024-11-27"), Some(alice.id)).unwrap();
    assert_eq!(week.start_date, d("2024-11-25"));
    assert_eq!(week.end_date, d("2024-12-01"));
    assert_eq!(week.net_minutes, 540);
    assert_eq!(week.target_minutes, 2100);
    assert_eq!(week.delta_minutes, 540 - 2100);
    assert_eq!(week.percentage, 26);

    let all = StatsLogic::monthly(&pool, &work, d("2024-11-01"), None).unwrap();
    assert_eq!(all.work_minutes, 420 + 480);

    let by_day = StatsLogic::work_by_day(&pool, d("2024-11-25"), d("2024-11-30"), Some(alice.id)).unwrap();
    assert_eq!(by_day.get(&d("2024-11-27")), Some(&120));

    let avg = StatsLogic::daily_average(&pool, d("2024-11-25"), d("2024-11-30"), Some(alice.id)).unwrap();
    assert_eq!(avg, 270);

    let year = StatsLogic::yearly(&pool, &work, d("2024-03-03"), Some(alice.id)).unwrap();
    assert_eq!(year.net_minutes, 540);
    assert_eq!(year.target_minutes, 109_202);
}
