use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw sums for a date range, before any target is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub course_minutes: i64,
    pub net_minutes: i64,
    pub by_day: BTreeMap<NaiveDate, i64>,
}

/// Totals enriched with the period target. Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodStats {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub course_minutes: i64,
    pub net_minutes: i64,
    pub by_day: BTreeMap<NaiveDate, i64>,
    pub target_minutes: i64,
    pub delta_minutes: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" | "d" => Some(Period::Day),
            "week" | "weekly" | "w" => Some(Period::Week),
            "month" | "monthly" | "m" => Some(Period::Month),
            "year" | "yearly" | "y" => Some(Period::Year),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}
