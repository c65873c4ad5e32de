use crate::config::Config;
use crate::core::session::SessionGuard;
use crate::core::throttle::LoginThrottle;
use crate::core::users::UserLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::models::user::User;
use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Too many recent failures for this username or address. Not recorded.
    Locked,
    /// Unknown user, inactive account or wrong password.
    Rejected,
    Authenticated { session: Session, user: User },
}

/// Throttle, then credentials, then a fresh session.
pub struct AuthFlow {
    pub throttle: LoginThrottle,
    pub guard: SessionGuard,
}

impl AuthFlow {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            throttle: LoginThrottle::from_config(&cfg.security),
            guard: SessionGuard::from_config(&cfg.security),
        }
    }

    pub fn login(
        &self,
        pool: &DbPool,
        username: &str,
        password: &str,
        ip: &str,
        now: NaiveDateTime,
        previous_session: Option<&str>,
    ) -> AppResult<LoginOutcome> {
        let username = username.trim();

        if self.throttle.is_locked(pool, username, ip, now)? {
            ttlog(&pool.conn, "login_locked", username, &format!("Locked out from {ip}"))?;
            return Ok(LoginOutcome::Locked);
        }

        let Some(user) = UserLogic::verify_credentials(pool, username, password, now)? else {
            self.throttle.record_attempt(pool, username, ip, false, now)?;
            log::warn!("failed login for '{username}' from {ip}");
            return Ok(LoginOutcome::Rejected);
        };

        self.throttle.record_attempt(pool, username, ip, true, now)?;
        let session = self.guard.login(pool, &user, ip, now, previous_session)?;
        ttlog(&pool.conn, "login", username, &format!("Signed in from {ip}"))?;
        log::info!("user '{username}' signed in from {ip}");

        Ok(LoginOutcome::Authenticated { session, user })
    }

    pub fn logout(&self, pool: &DbPool, session_id: &str) -> AppResult<bool> {
        let removed = self.guard.logout(pool, session_id)?;
        if removed {
            ttlog(&pool.conn, "logout", "", "Session closed")?;
        }
        Ok(removed)
    }
}
