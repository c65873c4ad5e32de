use super::category::EntryCategory;
use crate::utils::time;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,              // ⇔ entries.user_id
    pub date: NaiveDate,           // ⇔ entries.date (TEXT "YYYY-MM-DD")
    pub start_time: NaiveTime,     // ⇔ entries.start_time (TEXT "HH:MM")
    pub end_time: NaiveTime,       // ⇔ entries.end_time (TEXT "HH:MM")
    pub category: EntryCategory,   // ⇔ entries.type ('work' | 'break' | 'course')
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TimeEntry {
    pub fn duration_minutes(&self) -> i64 {
        time::duration(self.start_time, self.end_time)
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_time.format("%H:%M").to_string()
    }
}

/// Raw, unvalidated entry fields as they arrive from a form or the CLI.
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub category: String,
    pub description: String,
}

/// Entry fields after boundary validation.
#[derive(Debug, Clone)]
pub struct ValidEntry {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub category: EntryCategory,
    pub description: String,
}

/// Result of an insert that silently ignores exact duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(i64),
    Skipped,
}

impl InsertOutcome {
    pub fn was_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<EntryCategory>,
    pub user_id: Option<i64>,
}
