use crate::config::WorkConfig;
use crate::models::period_stats::{Period, PeriodStats, PeriodTotals};
use chrono::NaiveDate;

/// Working days the weekly contract is spread over.
const WORKDAYS_PER_WEEK: f64 = 5.0;

pub fn daily_target(weekly_hours: f64) -> i64 {
    (weekly_hours * 60.0 / WORKDAYS_PER_WEEK).round() as i64
}

pub fn weekly_target(weekly_hours: f64) -> i64 {
    (weekly_hours * 60.0).round() as i64
}

pub fn monthly_target(monthly_hours: f64) -> i64 {
    (monthly_hours * 60.0).round() as i64
}

pub fn yearly_target(monthly_hours: f64) -> i64 {
    (monthly_hours * 12.0 * 60.0).round() as i64
}

pub fn target_for(period: Period, work: &WorkConfig) -> i64 {
    match period {
        Period::Day => daily_target(work.contract_weekly_hours),
        Period::Week => weekly_target(work.contract_weekly_hours),
        Period::Month => monthly_target(work.monthly_target_hours),
        Period::Year => yearly_target(work.monthly_target_hours),
    }
}

/// Completion percentage, capped at 100. A zero target yields 0.
pub fn percentage(net: i64, target: i64) -> i64 {
    if target <= 0 {
        return 0;
    }
    let pct = (net as f64 / target as f64 * 100.0).round() as i64;
    pct.min(100)
}

/// Attach target, delta and percentage to raw totals.
pub fn enrich(totals: PeriodTotals, start: NaiveDate, end: NaiveDate, target: i64) -> PeriodStats {
    let net = totals.net_minutes;
    PeriodStats {
        start_date: start,
        end_date: end,
        work_minutes: totals.work_minutes,
        break_minutes: totals.break_minutes,
        course_minutes: totals.course_minutes,
        net_minutes: net,
        by_day: totals.by_day,
        target_minutes: target,
        delta_minutes: net - target,
        percentage: percentage(net, target),
    }
}
