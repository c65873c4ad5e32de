//! Storage for the append-only login attempt log and password reset tokens.

use crate::errors::{AppError, AppResult};
use crate::models::login_attempt::LoginAttempt;
use crate::models::reset_token::{PasswordResetToken, ResetAuditRow};
use crate::utils::time::parse_timestamp;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------
// login_attempts
// ---------------------------

pub fn insert_attempt(
    conn: &Connection,
    username: &str,
    ip_address: &str,
    success: bool,
    now: &str,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO login_attempts (username, ip_address, success, created_at)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![username, ip_address, success, now])?;
    Ok(())
}

/// Failed attempts since `since` matching the username OR the address.
pub fn count_recent_failures(
    conn: &Connection,
    username: &str,
    ip_address: &str,
    since: &str,
) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "SELECT COUNT(*) FROM login_attempts
         WHERE success = 0
           AND created_at >= ?1
           AND (username = ?2 OR ip_address = ?3)",
    )?;
    Ok(stmt.query_row(params![since, username, ip_address], |row| row.get(0))?)
}

pub fn recent_attempts(conn: &Connection, limit: i64) -> AppResult<Vec<LoginAttempt>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, ip_address, success, created_at
         FROM login_attempts
         ORDER BY created_at DESC, id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit], |row| {
        Ok(LoginAttempt {
            id: row.get(0)?,
            username: row.get(1)?,
            ip_address: row.get(2)?,
            success: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// password_resets
// ---------------------------

fn timestamp_col(row: &Row, col: &str) -> Result<NaiveDateTime> {
    let raw: String = row.get(col)?;
    parse_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::InvalidDate(raw.clone())),
        )
    })
}

fn map_token(row: &Row) -> Result<PasswordResetToken> {
    let used_at = match row.get::<_, Option<String>>("used_at")? {
        Some(_) => Some(timestamp_col(row, "used_at")?),
        None => None,
    };

    Ok(PasswordResetToken {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        token_hash: row.get("token_hash")?,
        expires_at: timestamp_col(row, "expires_at")?,
        used_at,
        created_at: timestamp_col(row, "created_at")?,
    })
}

pub fn insert_reset(
    conn: &Connection,
    user_id: i64,
    token_hash: &str,
    expires_at: &str,
    now: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO password_resets (user_id, token_hash, expires_at, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, token_hash, expires_at, now],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Token with this hash that is unused and not expired at `now`.
pub fn find_valid_reset(
    conn: &Connection,
    token_hash: &str,
    now: &str,
) -> AppResult<Option<PasswordResetToken>> {
    Ok(conn
        .query_row(
            "SELECT id, user_id, token_hash, expires_at, used_at, created_at
             FROM password_resets
             WHERE token_hash = ?1
               AND used_at IS NULL
               AND expires_at >= ?2
             LIMIT 1",
            params![token_hash, now],
            map_token,
        )
        .optional()?)
}

/// Conditional consume. Returns the number of rows changed (0 if already used).
pub fn mark_reset_used(conn: &Connection, id: i64, now: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE password_resets SET used_at = ?1 WHERE id = ?2 AND used_at IS NULL",
        params![now, id],
    )?)
}

pub fn find_reset_by_id(conn: &Connection, id: i64) -> AppResult<Option<PasswordResetToken>> {
    Ok(conn
        .query_row(
            "SELECT id, user_id, token_hash, expires_at, used_at, created_at
             FROM password_resets WHERE id = ?1",
            [id],
            map_token,
        )
        .optional()?)
}

pub fn recent_resets(conn: &Connection, limit: i64) -> AppResult<Vec<ResetAuditRow>> {
    let mut stmt = conn.prepare(
        "SELECT pr.id, pr.user_id, u.username, u.email, pr.created_at, pr.expires_at, pr.used_at
         FROM password_resets pr
         JOIN users u ON u.id = pr.user_id
         ORDER BY pr.created_at DESC, pr.id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit], |row| {
        Ok(ResetAuditRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            username: row.get(2)?,
            email: row.get(3)?,
            created_at: row.get(4)?,
            expires_at: row.get(5)?,
            used_at: row.get(6)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
