use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, is_active, created_at, updated_at, last_login";

pub fn map_user(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        role,
        is_active: row.get("is_active")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        last_login: row.get("last_login")?,
    })
}

pub fn insert_user(
    conn: &Connection,
    username: &str,
    email: Option<&str>,
    password_hash: &str,
    role: Role,
    is_active: bool,
    now: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (username, email, password_hash, role, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![username, email, password_hash, role.to_db_str(), is_active, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_user).optional()?)
}

pub fn find_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
    Ok(conn.query_row(&sql, [username], map_user).optional()?)
}

pub fn find_by_email(conn: &Connection, email: &str) -> AppResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 COLLATE NOCASE");
    Ok(conn.query_row(&sql, [email], map_user).optional()?)
}

/// True when `username` or `email` is already taken by a user other than `except_id`.
pub fn exists_username_or_email(
    conn: &Connection,
    username: &str,
    email: Option<&str>,
    except_id: Option<i64>,
) -> AppResult<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users
         WHERE (username = ?1 OR (?2 IS NOT NULL AND email = ?2 COLLATE NOCASE))
           AND (?3 IS NULL OR id <> ?3)",
        params![username, email, except_id],
        |row| row.get(0),
    )?;
    Ok(n > 0)
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_password(conn: &Connection, id: i64, password_hash: &str, now: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE users SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
        params![password_hash, now, id],
    )?)
}

pub fn set_active(conn: &Connection, id: i64, active: bool, now: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE users SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
        params![active, now, id],
    )?)
}

pub fn touch_last_login(conn: &Connection, id: i64, now: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET last_login = ?1 WHERE id = ?2",
        params![now, id],
    )?;
    Ok(())
}

pub fn count_active_admins(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'admin' AND is_active = 1",
        [],
        |row| row.get(0),
    )?)
}

pub fn count_users(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

pub fn delete_user(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM users WHERE id = ?1", [id])?)
}
