use crate::errors::{AppError, AppResult};
use crate::models::category::EntryCategory;
use crate::models::entry::{EntryFilter, InsertOutcome, TimeEntry, ValidEntry};
use crate::utils::date::format_date;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

const ENTRY_COLUMNS: &str =
    "id, user_id, date, start_time, end_time, type, description, created_at, updated_at";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let date_str: String = row.get("date")?;
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    // Imported rows may carry seconds ("09:00:00"); only HH:MM matters.
    let start_time = parse_stored_time(&start_str)
        .ok_or_else(|| conversion_error(AppError::InvalidTime(start_str.clone())))?;
    let end_time = parse_stored_time(&end_str)
        .ok_or_else(|| conversion_error(AppError::InvalidTime(end_str.clone())))?;

    let kind_str: String = row.get("type")?;
    let category = EntryCategory::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(AppError::InvalidCategory(kind_str.clone())))?;

    Ok(TimeEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        start_time,
        end_time,
        category,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_stored_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.get(..5)?, "%H:%M").ok()
}

/// Insert an entry unless the exact `(user, date, start, end, type)` tuple exists.
pub fn insert_entry(
    conn: &Connection,
    user_id: i64,
    entry: &ValidEntry,
    now: &str,
) -> AppResult<InsertOutcome> {
    let changed = conn.execute(
        "INSERT INTO entries (user_id, date, start_time, end_time, type, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
         ON CONFLICT(user_id, date, start_time, end_time, type) DO NOTHING",
        params![
            user_id,
            format_date(&entry.date),
            entry.start_time.format("%H:%M").to_string(),
            entry.end_time.format("%H:%M").to_string(),
            entry.category.to_db_str(),
            entry.description,
            now,
        ],
    )?;

    if changed == 0 {
        Ok(InsertOutcome::Skipped)
    } else {
        Ok(InsertOutcome::Inserted(conn.last_insert_rowid()))
    }
}

/// Update all fields except owner. Returns the number of rows changed;
/// 0 means the new values collide with another entry of the same owner.
pub fn update_entry(conn: &Connection, id: i64, entry: &ValidEntry, now: &str) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE OR IGNORE entries
         SET date = ?1, start_time = ?2, end_time = ?3, type = ?4,
             description = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            format_date(&entry.date),
            entry.start_time.format("%H:%M").to_string(),
            entry.end_time.format("%H:%M").to_string(),
            entry.category.to_db_str(),
            entry.description,
            now,
            id,
        ],
    )?;
    Ok(changed)
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM entries WHERE id = ?1", [id])?)
}

pub fn find_entry(conn: &Connection, id: i64) -> AppResult<Option<TimeEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

/// Entries with `from <= date <= to` (ISO strings compare like dates),
/// optionally restricted to one owner.
pub fn load_entries_in_range(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
    user_id: Option<i64>,
) -> AppResult<Vec<TimeEntry>> {
    list_entries(
        conn,
        &EntryFilter {
            from: Some(*from),
            to: Some(*to),
            category: None,
            user_id,
        },
    )
}

pub fn list_entries(conn: &Connection, filter: &EntryFilter) -> AppResult<Vec<TimeEntry>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(from) = &filter.from {
        clauses.push("date >= ?");
        values.push(Box::new(format_date(from)));
    }
    if let Some(to) = &filter.to {
        clauses.push("date <= ?");
        values.push(Box::new(format_date(to)));
    }
    if let Some(cat) = &filter.category {
        clauses.push("type = ?");
        values.push(Box::new(cat.to_db_str()));
    }
    if let Some(uid) = filter.user_id {
        clauses.push("user_id = ?");
        values.push(Box::new(uid));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM entries {where_sql}
         ORDER BY date ASC, start_time ASC, id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(values.iter().map(|v| v.as_ref())),
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_entries_for_day(conn: &Connection, user_id: i64, date: &NaiveDate) -> AppResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE user_id = ?1 AND date = ?2",
        params![user_id, format_date(date)],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Latest end time recorded by `user_id` on `date`, used to prefill the next entry.
pub fn last_end_time(conn: &Connection, user_id: i64, date: &NaiveDate) -> AppResult<Option<String>> {
    let end: Option<String> = conn
        .query_row(
            "SELECT end_time FROM entries
             WHERE user_id = ?1 AND date = ?2
             ORDER BY end_time DESC
             LIMIT 1",
            params![user_id, format_date(date)],
            |row| row.get(0),
        )
        .optional()?;
    Ok(end)
}

pub fn count_entries(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?)
}
