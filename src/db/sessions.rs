use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use crate::models::user::Role;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

fn map_session(row: &Row) -> Result<Session> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(AppError::InvalidRole(role_str.clone())))?;

    let login_raw: String = row.get("login_time")?;
    let activity_raw: String = row.get("last_activity")?;
    let login_time = parse_timestamp(&login_raw)
        .ok_or_else(|| conversion_error(AppError::InvalidDate(login_raw.clone())))?;
    let last_activity = parse_timestamp(&activity_raw)
        .ok_or_else(|| conversion_error(AppError::InvalidDate(activity_raw.clone())))?;

    Ok(Session {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        role,
        login_time,
        last_activity,
        bound_ip: row.get("bound_ip")?,
        csrf_secret: row.get("csrf_secret")?,
    })
}

pub fn insert_session(conn: &Connection, s: &Session) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sessions (id, user_id, role, login_time, last_activity, bound_ip, csrf_secret)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            s.id,
            s.user_id,
            s.role.to_db_str(),
            format_timestamp(&s.login_time),
            format_timestamp(&s.last_activity),
            s.bound_ip,
            s.csrf_secret,
        ],
    )?;
    Ok(())
}

pub fn find_session(conn: &Connection, id: &str) -> AppResult<Option<Session>> {
    Ok(conn
        .query_row(
            "SELECT id, user_id, role, login_time, last_activity, bound_ip, csrf_secret
             FROM sessions WHERE id = ?1",
            [id],
            map_session,
        )
        .optional()?)
}

pub fn touch_session(conn: &Connection, id: &str, now: &NaiveDateTime) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions SET last_activity = ?1 WHERE id = ?2",
        params![format_timestamp(now), id],
    )?;
    Ok(())
}

pub fn delete_session(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?)
}

pub fn delete_user_sessions(conn: &Connection, user_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM sessions WHERE user_id = ?1", [user_id])?)
}

pub fn count_user_sessions(conn: &Connection, user_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?)
}
