use crate::models::category::EntryCategory;
use crate::models::entry::TimeEntry;
use crate::models::period_stats::PeriodTotals;
use chrono::NaiveDate;

/// Sum entry durations per category over the inclusive range `[from, to]`.
///
/// `net = work + course`; `by_day` collects every non-break minute.
/// Entries outside the range, or not owned by `owner` when one is given,
/// are ignored.
pub fn aggregate(
    entries: &[TimeEntry],
    from: NaiveDate,
    to: NaiveDate,
    owner: Option<i64>,
) -> PeriodTotals {
    let mut totals = PeriodTotals::default();

    for e in entries {
        if e.date < from || e.date > to {
            continue;
        }
        if let Some(uid) = owner
            && e.user_id != uid
        {
            continue;
        }

        let mins = e.duration_minutes();
        match e.category {
            EntryCategory::Work => totals.work_minutes += mins,
            EntryCategory::Break => totals.break_minutes += mins,
            EntryCategory::Course => totals.course_minutes += mins,
        }

        if e.category.is_productive() {
            *totals.by_day.entry(e.date).or_insert(0) += mins;
        }
    }

    totals.net_minutes = totals.work_minutes + totals.course_minutes;
    totals
}

/// Average net minutes per day present in `by_day`. A day holding only a
/// zero-length work or course entry still counts.
pub fn daily_average(totals: &PeriodTotals) -> i64 {
    let days = totals.by_day.len() as i64;
    if days == 0 {
        return 0;
    }
    (totals.net_minutes as f64 / days as f64).round() as i64
}
