use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LoginAttempt {
    pub id: i64,
    pub username: String,
    pub ip_address: String,
    pub success: bool,
    pub created_at: String,
}
