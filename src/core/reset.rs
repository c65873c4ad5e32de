use crate::config::{PasswordPolicy, SecurityConfig};
use crate::core::mailer::{Mailer, reset_link};
use crate::core::users::validate_password;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::security::{find_valid_reset, insert_reset, mark_reset_used, recent_resets};
use crate::db::sessions::delete_user_sessions;
use crate::db::users::{find_by_email, update_password};
use crate::errors::{AppError, AppResult};
use crate::models::reset_token::{PasswordResetToken, ResetAuditRow};
use crate::models::user::User;
use crate::utils::crypto::{TOKEN_LEN, generate_token, hash_token, hash_password};
use crate::utils::time::format_timestamp;
use chrono::{NaiveDateTime, TimeDelta};
use rusqlite::{Connection, TransactionBehavior};

/// Single-use, time-bound password reset secrets.
///
/// The raw secret only ever exists in the value returned by [`issue`];
/// storage keeps its SHA-256. Issuing a new token leaves earlier ones valid
/// until they expire.
///
/// [`issue`]: ResetTokenManager::issue
#[derive(Debug, Clone, Copy)]
pub struct ResetTokenManager {
    pub expiry_secs: i64,
}

fn validate_on(conn: &Connection, raw: &str, now: NaiveDateTime) -> AppResult<PasswordResetToken> {
    find_valid_reset(conn, &hash_token(raw), &format_timestamp(&now))?
        .ok_or(AppError::InvalidOrExpiredToken)
}

fn consume_on(conn: &Connection, id: i64, now: NaiveDateTime) -> AppResult<()> {
    if mark_reset_used(conn, id, &format_timestamp(&now))? == 0 {
        return Err(AppError::InvalidOrExpiredToken);
    }
    Ok(())
}

impl ResetTokenManager {
    pub fn new(expiry_secs: i64) -> Self {
        Self { expiry_secs }
    }

    pub fn from_config(cfg: &SecurityConfig) -> Self {
        Self::new(cfg.password_reset_expiry)
    }

    /// Store a fresh token for `user_id` and return the raw secret.
    pub fn issue(&self, pool: &DbPool, user_id: i64, now: NaiveDateTime) -> AppResult<String> {
        let expires_at = TimeDelta::try_seconds(self.expiry_secs)
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(|| {
                AppError::Config(format!("reset token expiry of {}s is out of range", self.expiry_secs))
            })?;
        let raw = generate_token(TOKEN_LEN);
        insert_reset(
            &pool.conn,
            user_id,
            &hash_token(&raw),
            &format_timestamp(&expires_at),
            &format_timestamp(&now),
        )?;
        log::info!("password reset token issued for user {user_id}");
        Ok(raw)
    }

    /// Unused and unexpired token matching `raw`. Every other case is the
    /// same opaque `InvalidOrExpiredToken`.
    pub fn validate(&self, pool: &DbPool, raw: &str, now: NaiveDateTime) -> AppResult<PasswordResetToken> {
        validate_on(&pool.conn, raw, now)
    }

    /// Mark the token used. Only the first of concurrent consumers succeeds.
    pub fn consume(&self, pool: &DbPool, token_id: i64, now: NaiveDateTime) -> AppResult<()> {
        consume_on(&pool.conn, token_id, now)
    }

    /// Validate, consume and set the new password as one unit. A failure at
    /// any step rolls back, leaving the token unconsumed. Sessions of the
    /// user are destroyed on success.
    pub fn redeem(
        &self,
        pool: &mut DbPool,
        policy: &PasswordPolicy,
        raw: &str,
        new_password: &str,
        now: NaiveDateTime,
    ) -> AppResult<i64> {
        validate_password(policy, new_password)?;
        let hash = hash_password(new_password)?;
        let ts = format_timestamp(&now);

        let user_id = {
            let tx = pool
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let token = validate_on(&tx, raw, now)?;
            consume_on(&tx, token.id, now)?;
            if update_password(&tx, token.user_id, &hash, &ts)? == 0 {
                return Err(AppError::UserNotFound(token.user_id.to_string()));
            }
            delete_user_sessions(&tx, token.user_id)?;

            tx.commit()?;
            token.user_id
        };

        ttlog(
            &pool.conn,
            "password_reset",
            &user_id.to_string(),
            "Password changed via reset token",
        )?;
        log::info!("password reset redeemed for user {user_id}");
        Ok(user_id)
    }

    /// Issue a token for the active account owning `email` and mail the link.
    /// An unknown or inactive address is a silent no-op so callers cannot
    /// tell which addresses exist.
    pub fn request_reset(
        &self,
        pool: &DbPool,
        mailer: &dyn Mailer,
        app_url: &str,
        email: &str,
        now: NaiveDateTime,
    ) -> AppResult<Option<User>> {
        let user = match find_by_email(&pool.conn, email.trim())? {
            Some(u) if u.is_active => u,
            _ => {
                log::info!("password reset requested for unknown address");
                return Ok(None);
            }
        };

        let raw = self.issue(pool, user.id, now)?;
        let link = reset_link(app_url, &raw);
        let body = format!(
            "Hello {},\n\nA password reset was requested for your account.\n\
             Follow this link within {} minutes to choose a new password:\n\n{}\n\n\
             If you did not ask for this, ignore this message.\n",
            user.username,
            self.expiry_secs / 60,
            link
        );

        // The address on record is the destination, never the typed one.
        let to = user.email.clone().unwrap_or_default();
        if !mailer.send(&to, "Password reset", &body)? {
            log::warn!("reset link for {} was not mailed", user.username);
        }
        ttlog(&pool.conn, "password_reset_request", &user.username, "Reset link issued")?;
        Ok(Some(user))
    }

    pub fn recent_resets(pool: &DbPool, limit: i64) -> AppResult<Vec<ResetAuditRow>> {
        recent_resets(&pool.conn, limit)
    }
}
