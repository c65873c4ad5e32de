pub mod category;
pub mod entry;
pub mod login_attempt;
pub mod period_stats;
pub mod reset_token;
pub mod session;
pub mod user;
