use crate::config::WorkConfig;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_entries_for_day, delete_entry, find_entry, insert_entry, last_end_time, list_entries,
    update_entry,
};
use crate::errors::{AppError, AppResult};
use crate::models::category::EntryCategory;
use crate::models::entry::{EntryFilter, EntryInput, InsertOutcome, TimeEntry, ValidEntry};
use crate::models::user::User;
use crate::utils::date::parse_date;
use crate::utils::time::{format_timestamp, parse_time};
use chrono::{NaiveDate, NaiveDateTime};

/// Boundary validation of raw entry fields.
pub fn validate(input: &EntryInput, work: &WorkConfig) -> AppResult<ValidEntry> {
    let date = parse_date(input.date.trim())
        .ok_or_else(|| AppError::InvalidDate(input.date.clone()))?;
    let start_time = parse_time(input.start_time.trim())
        .ok_or_else(|| AppError::InvalidTime(input.start_time.clone()))?;
    let end_time = parse_time(input.end_time.trim())
        .ok_or_else(|| AppError::InvalidTime(input.end_time.clone()))?;
    let category = EntryCategory::from_input(&input.category)
        .ok_or_else(|| AppError::InvalidCategory(input.category.clone()))?;

    let description = input.description.trim().to_string();
    if description.chars().count() > work.max_description_length {
        return Err(AppError::DescriptionTooLong(work.max_description_length));
    }

    Ok(ValidEntry {
        date,
        start_time,
        end_time,
        category,
        description,
    })
}

/// Owners manage their own entries; administrators manage everyone's.
pub fn can_access(actor: &User, entry: &TimeEntry) -> bool {
    actor.role.is_admin() || actor.id == entry.user_id
}

/// High-level logic for entry creation, editing and removal.
pub struct EntryLogic;

impl EntryLogic {
    pub fn create(
        pool: &DbPool,
        work: &WorkConfig,
        owner: &User,
        input: &EntryInput,
        now: NaiveDateTime,
    ) -> AppResult<InsertOutcome> {
        let entry = validate(input, work)?;

        if count_entries_for_day(&pool.conn, owner.id, &entry.date)? >= work.max_entries_per_day {
            return Err(AppError::DailyLimitReached(work.max_entries_per_day));
        }

        let outcome = insert_entry(&pool.conn, owner.id, &entry, &format_timestamp(&now))?;
        match outcome {
            InsertOutcome::Inserted(id) => {
                ttlog(
                    &pool.conn,
                    "entry_add",
                    &id.to_string(),
                    &format!(
                        "{} {} {}-{} by {}",
                        entry.category.to_db_str(),
                        entry.date,
                        entry.start_time.format("%H:%M"),
                        entry.end_time.format("%H:%M"),
                        owner.username
                    ),
                )?;
            }
            InsertOutcome::Skipped => {
                log::debug!("duplicate entry for {} on {} skipped", owner.username, entry.date);
            }
        }
        Ok(outcome)
    }

    fn load_for(pool: &DbPool, actor: &User, id: i64) -> AppResult<TimeEntry> {
        let entry = find_entry(&pool.conn, id)?.ok_or(AppError::EntryNotFound(id))?;
        if !can_access(actor, &entry) {
            log::warn!("user {} denied access to entry {}", actor.username, id);
            return Err(AppError::Forbidden);
        }
        Ok(entry)
    }

    /// Replace the fields of an entry. `Skipped` when the new values would
    /// duplicate another entry of the same owner.
    pub fn update(
        pool: &DbPool,
        work: &WorkConfig,
        actor: &User,
        id: i64,
        input: &EntryInput,
        now: NaiveDateTime,
    ) -> AppResult<InsertOutcome> {
        let entry = validate(input, work)?;
        let stored = Self::load_for(pool, actor, id)?;

        // Moving to another day takes a slot on that day.
        if entry.date != stored.date
            && count_entries_for_day(&pool.conn, stored.user_id, &entry.date)? >= work.max_entries_per_day
        {
            return Err(AppError::DailyLimitReached(work.max_entries_per_day));
        }

        if update_entry(&pool.conn, id, &entry, &format_timestamp(&now))? == 0 {
            return Ok(InsertOutcome::Skipped);
        }
        ttlog(&pool.conn, "entry_update", &id.to_string(), &format!("Updated by {}", actor.username))?;
        Ok(InsertOutcome::Inserted(id))
    }

    pub fn delete(pool: &DbPool, actor: &User, id: i64) -> AppResult<TimeEntry> {
        let entry = Self::load_for(pool, actor, id)?;
        delete_entry(&pool.conn, id)?;
        ttlog(&pool.conn, "entry_delete", &id.to_string(), &format!("Deleted by {}", actor.username))?;
        Ok(entry)
    }

    pub fn list(pool: &DbPool, filter: &EntryFilter) -> AppResult<Vec<TimeEntry>> {
        list_entries(&pool.conn, filter)
    }

    pub fn last_end_time(pool: &DbPool, owner: &User, date: NaiveDate) -> AppResult<Option<String>> {
        last_end_time(&pool.conn, owner.id, &date)
    }
}
