use crate::config::SecurityConfig;
use crate::db::pool::DbPool;
use crate::db::sessions::{
    delete_session, delete_user_sessions, find_session, insert_session, touch_session,
};
use crate::errors::AppResult;
use crate::models::session::{Session, SessionCheck};
use crate::models::user::User;
use crate::utils::crypto::{TOKEN_LEN, constant_time_eq, generate_token};
use chrono::NaiveDateTime;

/// Server-side session lifecycle: login binds the client address and starts
/// the inactivity clock; every later check either slides it or tears the
/// session down.
#[derive(Debug, Clone, Copy)]
pub struct SessionGuard {
    /// Seconds of inactivity allowed. 0 or negative never expires.
    pub timeout_secs: i64,
}

impl SessionGuard {
    pub fn new(timeout_secs: i64) -> Self {
        Self { timeout_secs }
    }

    pub fn from_config(cfg: &SecurityConfig) -> Self {
        Self::new(cfg.session_timeout)
    }

    /// Start a session for `user`. Any `previous` id is destroyed first so a
    /// planted identifier never survives authentication.
    pub fn login(
        &self,
        pool: &DbPool,
        user: &User,
        ip: &str,
        now: NaiveDateTime,
        previous: Option<&str>,
    ) -> AppResult<Session> {
        if let Some(old) = previous {
            delete_session(&pool.conn, old)?;
        }

        let session = Session {
            id: generate_token(TOKEN_LEN),
            user_id: user.id,
            role: user.role,
            login_time: now,
            last_activity: now,
            bound_ip: ip.to_string(),
            csrf_secret: generate_token(TOKEN_LEN),
        };
        insert_session(&pool.conn, &session)?;

        log::info!("session started for user {} from {}", user.username, ip);
        Ok(session)
    }

    fn is_expired(&self, session: &Session, now: NaiveDateTime) -> bool {
        if self.timeout_secs <= 0 {
            return false;
        }
        (now - session.last_activity).num_seconds() > self.timeout_secs
    }

    /// Evaluate a session at the start of a request.
    pub fn check(
        &self,
        pool: &DbPool,
        session_id: &str,
        ip: &str,
        now: NaiveDateTime,
    ) -> AppResult<SessionCheck> {
        let Some(mut session) = find_session(&pool.conn, session_id)? else {
            return Ok(SessionCheck::Anonymous);
        };

        if self.is_expired(&session, now) {
            delete_session(&pool.conn, session_id)?;
            log::warn!(
                "session for user {} expired after {}s of inactivity",
                session.user_id,
                (now - session.last_activity).num_seconds()
            );
            return Ok(SessionCheck::Expired);
        }

        if session.bound_ip != ip {
            delete_session(&pool.conn, session_id)?;
            log::warn!(
                "session for user {} presented from {} but bound to {}",
                session.user_id,
                ip,
                session.bound_ip
            );
            return Ok(SessionCheck::IpMismatch);
        }

        touch_session(&pool.conn, session_id, &now)?;
        session.last_activity = now;
        Ok(SessionCheck::Valid(session))
    }

    pub fn logout(&self, pool: &DbPool, session_id: &str) -> AppResult<bool> {
        Ok(delete_session(&pool.conn, session_id)? > 0)
    }

    /// Drop every session of a user, e.g. after a password change.
    pub fn destroy_user_sessions(&self, pool: &DbPool, user_id: i64) -> AppResult<usize> {
        delete_user_sessions(&pool.conn, user_id)
    }
}

pub fn verify_csrf(session: &Session, presented: &str) -> bool {
    constant_time_eq(&session.csrf_secret, presented)
}
