use crate::config::PasswordPolicy;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users::{
    count_active_admins, delete_user, exists_username_or_email, find_by_email, find_by_id,
    find_by_username, insert_user, list_users, set_active, touch_last_login, update_password,
};
use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, User};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,}$").expect("valid username regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

pub fn validate_username(username: &str) -> AppResult<()> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(AppError::InvalidUsername(format!(
            "'{username}' (at least 3 letters, digits or underscores)"
        )))
    }
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AppError::InvalidEmail(email.to_string()))
    }
}

/// Check a password against the policy, reporting every unmet rule at once.
pub fn validate_password(policy: &PasswordPolicy, password: &str) -> AppResult<()> {
    let mut problems = Vec::new();

    if password.chars().count() < policy.min_length {
        problems.push(format!("must be at least {} characters long", policy.min_length));
    }
    if policy.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("must contain an uppercase letter".to_string());
    }
    if policy.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("must contain a lowercase letter".to_string());
    }
    if policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("must contain a digit".to_string());
    }
    if policy.require_special && password.chars().all(|c| c.is_ascii_alphanumeric()) {
        problems.push("must contain a special character".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::WeakPassword(problems.join(", ")))
    }
}

/// Credential store operations.
pub struct UserLogic;

impl UserLogic {
    pub fn create(
        pool: &DbPool,
        policy: &PasswordPolicy,
        input: &NewUser,
        now: NaiveDateTime,
    ) -> AppResult<User> {
        validate_username(&input.username)?;

        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());
        if let Some(e) = email {
            validate_email(e)?;
        }

        validate_password(policy, &input.password)?;

        if exists_username_or_email(&pool.conn, &input.username, email, None)? {
            return Err(AppError::DuplicateUser(input.username.clone()));
        }

        let hash = hash_password(&input.password)?;
        let id = insert_user(
            &pool.conn,
            &input.username,
            email,
            &hash,
            input.role,
            input.is_active,
            &format_timestamp(&now),
        )?;

        ttlog(
            &pool.conn,
            "user_create",
            &input.username,
            &format!("Created {} account", input.role.to_db_str()),
        )?;
        log::info!("user '{}' created with id {}", input.username, id);

        find_by_id(&pool.conn, id)?.ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// `None` for an unknown user, an inactive account or a wrong password.
    /// A match refreshes `last_login`.
    pub fn verify_credentials(
        pool: &DbPool,
        username: &str,
        password: &str,
        now: NaiveDateTime,
    ) -> AppResult<Option<User>> {
        let Some(mut user) = find_by_username(&pool.conn, username)? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }
        if !verify_password(password, &user.password_hash)? {
            return Ok(None);
        }

        let ts = format_timestamp(&now);
        touch_last_login(&pool.conn, user.id, &ts)?;
        user.last_login = Some(ts);
        Ok(Some(user))
    }

    pub fn update_password(
        pool: &DbPool,
        policy: &PasswordPolicy,
        user_id: i64,
        password: &str,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        validate_password(policy, password)?;
        let hash = hash_password(password)?;
        if update_password(&pool.conn, user_id, &hash, &format_timestamp(&now))? == 0 {
            return Err(AppError::UserNotFound(user_id.to_string()));
        }
        Ok(())
    }

    pub fn set_active(pool: &DbPool, user_id: i64, active: bool, now: NaiveDateTime) -> AppResult<()> {
        let user = Self::get(pool, user_id)?;
        if !active && user.role.is_admin() && user.is_active && count_active_admins(&pool.conn)? <= 1 {
            return Err(AppError::LastAdmin);
        }

        set_active(&pool.conn, user_id, active, &format_timestamp(&now))?;
        let op = if active { "user_activate" } else { "user_deactivate" };
        ttlog(&pool.conn, op, &user.username, "Account status changed")?;
        Ok(())
    }

    /// Delete a user and, through the cascade, their entries, tokens and sessions.
    pub fn delete(pool: &DbPool, user_id: i64) -> AppResult<()> {
        let user = Self::get(pool, user_id)?;
        if user.role.is_admin() && count_active_admins(&pool.conn)? <= 1 {
            return Err(AppError::LastAdmin);
        }

        delete_user(&pool.conn, user_id)?;
        ttlog(&pool.conn, "user_delete", &user.username, "Account deleted")?;
        log::info!("user '{}' deleted", user.username);
        Ok(())
    }

    pub fn get(pool: &DbPool, user_id: i64) -> AppResult<User> {
        find_by_id(&pool.conn, user_id)?.ok_or_else(|| AppError::UserNotFound(user_id.to_string()))
    }

    pub fn find_by_username(pool: &DbPool, username: &str) -> AppResult<Option<User>> {
        find_by_username(&pool.conn, username)
    }

    pub fn find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<User>> {
        find_by_email(&pool.conn, email.trim())
    }

    /// Look up by username, failing with `UserNotFound`.
    pub fn require(pool: &DbPool, username: &str) -> AppResult<User> {
        find_by_username(&pool.conn, username)?
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<User>> {
        list_users(&pool.conn)
    }
}
