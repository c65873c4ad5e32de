//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid entry category: {0}")]
    InvalidCategory(String),

    #[error("Description too long (max {0} characters)")]
    DescriptionTooLong(usize),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Password {0}")]
    WeakPassword(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Daily entry limit reached ({0} max)")]
    DailyLimitReached(i64),

    #[error("Entry {0} not found")]
    EntryNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Username or email already in use: {0}")]
    DuplicateUser(String),

    #[error("Cannot delete the last administrator")]
    LastAdmin,

    #[error("Operation not permitted")]
    Forbidden,

    #[error("Reset token is invalid or expired")]
    InvalidOrExpiredToken,

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Logger initialisation failed: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
