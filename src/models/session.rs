use super::user::Role;
use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub role: Role,
    pub login_time: NaiveDateTime,
    pub last_activity: NaiveDateTime,
    pub bound_ip: String,
    pub csrf_secret: String,
}

/// Outcome of checking a session at the start of an authenticated request.
#[derive(Debug, Clone)]
pub enum SessionCheck {
    /// Still valid; `last_activity` has been refreshed.
    Valid(Session),
    /// No session with that id (never existed, logged out, or already torn down).
    Anonymous,
    /// Inactivity timeout exceeded; the session was destroyed.
    Expired,
    /// Request came from another address; the session was destroyed.
    IpMismatch,
}

impl SessionCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionCheck::Valid(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionCheck::Valid(s) => Some(s),
            _ => None,
        }
    }

    /// Message shown on the login page. Expiry and IP mismatch look identical.
    pub fn reauth_message(&self) -> Option<&'static str> {
        match self {
            SessionCheck::Expired | SessionCheck::IpMismatch => {
                Some("Your session has expired, please sign in again.")
            }
            _ => None,
        }
    }
}
