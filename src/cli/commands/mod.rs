pub mod add;
pub mod config;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod login;
pub mod reset;
pub mod security;
pub mod session;
pub mod stats;
pub mod user;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database with the schema brought up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
