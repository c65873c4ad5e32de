use crate::config::WorkConfig;
use crate::core::calculator::aggregate::{aggregate, daily_average};
use crate::core::calculator::target::{enrich, target_for};
use crate::db::pool::DbPool;
use crate::db::queries::load_entries_in_range;
use crate::errors::AppResult;
use crate::models::period_stats::{Period, PeriodStats, PeriodTotals};
use crate::utils::date::{month_end, month_start, week_end, week_start, year_end, year_start};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Inclusive bounds of the period containing `date`.
pub fn period_bounds(period: Period, date: NaiveDate) -> (NaiveDate, NaiveDate) {
    match period {
        Period::Day => (date, date),
        Period::Week => (week_start(date), week_end(date)),
        Period::Month => (month_start(date), month_end(date)),
        Period::Year => (year_start(date), year_end(date)),
    }
}

/// Read-only statistics over stored entries.
pub struct StatsLogic;

impl StatsLogic {
    /// Raw totals for `[from, to]`, optionally for one owner.
    pub fn totals(
        pool: &DbPool,
        from: NaiveDate,
        to: NaiveDate,
        owner: Option<i64>,
    ) -> AppResult<PeriodTotals> {
        let entries = load_entries_in_range(&pool.conn, &from, &to, owner)?;
        Ok(aggregate(&entries, from, to, owner))
    }

    /// Totals for an arbitrary range with an explicit target.
    pub fn get_stats(
        pool: &DbPool,
        from: NaiveDate,
        to: NaiveDate,
        owner: Option<i64>,
        target_minutes: i64,
    ) -> AppResult<PeriodStats> {
        let totals = Self::totals(pool, from, to, owner)?;
        Ok(enrich(totals, from, to, target_minutes))
    }

    pub fn for_period(
        pool: &DbPool,
        work: &WorkConfig,
        period: Period,
        date: NaiveDate,
        owner: Option<i64>,
    ) -> AppResult<PeriodStats> {
        let (from, to) = period_bounds(period, date);
        Self::get_stats(pool, from, to, owner, target_for(period, work))
    }

    pub fn daily(pool: &DbPool, work: &WorkConfig, date: NaiveDate, owner: Option<i64>) -> AppResult<PeriodStats> {
        Self::for_period(pool, work, Period::Day, date, owner)
    }

    pub fn weekly(pool: &DbPool, work: &WorkConfig, date: NaiveDate, owner: Option<i64>) -> AppResult<PeriodStats> {
        Self::for_period(pool, work, Period::Week, date, owner)
    }

    pub fn monthly(pool: &DbPool, work: &WorkConfig, date: NaiveDate, owner: Option<i64>) -> AppResult<PeriodStats> {
        Self::for_period(pool, work, Period::Month, date, owner)
    }

    pub fn yearly(pool: &DbPool, work: &WorkConfig, date: NaiveDate, owner: Option<i64>) -> AppResult<PeriodStats> {
        Self::for_period(pool, work, Period::Year, date, owner)
    }

    pub fn work_by_day(
        pool: &DbPool,
        from: NaiveDate,
        to: NaiveDate,
        owner: Option<i64>,
    ) -> AppResult<BTreeMap<NaiveDate, i64>> {
        Ok(Self::totals(pool, from, to, owner)?.by_day)
    }

    pub fn daily_average(
        pool: &DbPool,
        from: NaiveDate,
        to: NaiveDate,
        owner: Option<i64>,
    ) -> AppResult<i64> {
        Ok(daily_average(&Self::totals(pool, from, to, owner)?))
    }
}
