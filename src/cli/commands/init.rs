use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), the SQLite
/// database and every pending migration.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut cfg = cfg.clone();
    if let Some(custom) = &cli.db {
        cfg.database = custom.clone();
    }

    if let Some(parent) = Path::new(&cfg.database).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    match cfg.save(cli.test)? {
        Some(path) => info(format!("Config file : {}", path.display())),
        None => info("Test mode: configuration file left untouched"),
    }
    info(format!("Database    : {}", cfg.database));

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    let versions = applied_versions(&pool.conn)?;
    info(format!(
        "Schema      : {} migration(s), latest {}",
        versions.len(),
        versions.last().map(String::as_str).unwrap_or("none")
    ));

    success(format!("Database initialized at {}", cfg.database));

    if let Err(e) = log::ttlog(&pool.conn, "init", "", "Database initialized") {
        warning(format!("Failed to write internal log: {e}"));
    }

    Ok(())
}
