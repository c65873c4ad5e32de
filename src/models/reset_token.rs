use chrono::NaiveDateTime;
use serde::Serialize;

/// Stored password reset request. Only the SHA-256 of the secret is kept.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetToken {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip)]
    pub token_hash: String,
    pub expires_at: NaiveDateTime,
    pub used_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Audit view of a reset request joined with its user.
#[derive(Debug, Clone, Serialize)]
pub struct ResetAuditRow {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub created_at: String,
    pub expires_at: String,
    pub used_at: Option<String>,
}
