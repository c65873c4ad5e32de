use crate::config::SecurityConfig;
use crate::db::pool::DbPool;
use crate::db::security::{count_recent_failures, insert_attempt, recent_attempts};
use crate::errors::{AppError, AppResult};
use crate::models::login_attempt::LoginAttempt;
use crate::utils::time::format_timestamp;
use chrono::{NaiveDateTime, TimeDelta};

/// Sliding-window lockout over the login attempt log.
///
/// A login is refused once `max_attempts` failures matching the username
/// or the client address fall inside the last `window_secs` seconds.
/// Failures age out on their own; a success does not reset the count.
#[derive(Debug, Clone, Copy)]
pub struct LoginThrottle {
    pub max_attempts: i64,
    pub window_secs: i64,
}

impl LoginThrottle {
    pub fn new(max_attempts: i64, window_secs: i64) -> Self {
        Self {
            max_attempts,
            window_secs,
        }
    }

    pub fn from_config(cfg: &SecurityConfig) -> Self {
        Self::new(cfg.login_max_attempts, cfg.login_lock_window)
    }

    pub fn failures_in_window(
        &self,
        pool: &DbPool,
        username: &str,
        ip: &str,
        now: NaiveDateTime,
    ) -> AppResult<i64> {
        let since = TimeDelta::try_seconds(self.window_secs)
            .and_then(|w| now.checked_sub_signed(w))
            .ok_or_else(|| {
                AppError::Config(format!("login lock window of {}s is out of range", self.window_secs))
            })?;
        count_recent_failures(&pool.conn, username, ip, &format_timestamp(&since))
    }

    pub fn is_locked(
        &self,
        pool: &DbPool,
        username: &str,
        ip: &str,
        now: NaiveDateTime,
    ) -> AppResult<bool> {
        let failures = self.failures_in_window(pool, username, ip, now)?;
        let locked = failures >= self.max_attempts;
        if locked {
            log::warn!("login locked for '{username}' from {ip}: {failures} recent failures");
        }
        Ok(locked)
    }

    pub fn record_attempt(
        &self,
        pool: &DbPool,
        username: &str,
        ip: &str,
        success: bool,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        insert_attempt(&pool.conn, username, ip, success, &format_timestamp(&now))
    }

    pub fn recent_attempts(pool: &DbPool, limit: i64) -> AppResult<Vec<LoginAttempt>> {
        recent_attempts(&pool.conn, limit)
    }
}
