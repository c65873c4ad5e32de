//! Time utilities: parsing HH:MM, duration computations, formatting minutes, etc.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Storage format for timestamps (`created_at`, `expires_at`, ...).
/// Lexicographic order equals chronological order.
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[01]\d|2[0-3]):[0-5]\d$").expect("valid clock regex"));

/// Strict `HH:MM` check (two digits each, 00-23 / 00-59).
pub fn is_clock_time(s: &str) -> bool {
    CLOCK_RE.is_match(s)
}

/// Convert `HH:MM` into minutes since midnight.
pub fn parse_clock_time(s: &str) -> AppResult<i64> {
    if !is_clock_time(s) {
        return Err(AppError::InvalidTime(s.to_string()));
    }
    let (h, m) = s
        .split_once(':')
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
    let hours: i64 = h.parse().map_err(|_| AppError::InvalidTime(s.to_string()))?;
    let mins: i64 = m.parse().map_err(|_| AppError::InvalidTime(s.to_string()))?;
    Ok(hours * 60 + mins)
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    if !is_clock_time(t) {
        return None;
    }
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Minutes between two clock times.
///
/// An end earlier than the start is read as "next day" (22:00 -> 02:00 = 240).
/// Equal times give 0, so a full 24h wraparound also collapses to 0.
pub fn duration(start: NaiveTime, end: NaiveTime) -> i64 {
    let start = minutes_of(start);
    let mut end = minutes_of(end);
    if end < start {
        end += MINUTES_PER_DAY;
    }
    (end - start).max(0)
}

/// Same as [`duration`] but on raw `HH:MM` strings.
pub fn duration_str(start: &str, end: &str) -> AppResult<i64> {
    let s = parse_time(start).ok_or_else(|| AppError::InvalidTime(start.to_string()))?;
    let e = parse_time(end).ok_or_else(|| AppError::InvalidTime(end.to_string()))?;
    Ok(duration(s, e))
}

fn minutes_of(t: NaiveTime) -> i64 {
    use chrono::Timelike;
    (t.hour() * 60 + t.minute()) as i64
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FMT).to_string()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FMT).ok()
}

/// Current local wall-clock time, the reference `now` for CLI calls.
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
