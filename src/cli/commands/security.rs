use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reset::ResetTokenManager;
use crate::core::throttle::LoginThrottle;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREEN, RED, RESET};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Security {
        attempts,
        resets,
        limit,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        // No flag means both views.
        let show_all = !attempts && !resets;

        if *attempts || show_all {
            let rows = LoginThrottle::recent_attempts(&pool, *limit)?;
            header("Login attempts");
            if rows.is_empty() {
                info("No login attempts recorded");
            } else {
                let mut table = Table::new(vec![
                    Column::new("WHEN", 19),
                    Column::new("USERNAME", 16),
                    Column::new("IP", 16),
                    Column::new("RESULT", 7),
                ]);
                for a in rows {
                    let result = if a.success {
                        format!("{GREEN}ok{RESET}     ")
                    } else {
                        format!("{RED}failed{RESET} ")
                    };
                    table.add_row(vec![a.created_at, a.username, a.ip_address, result]);
                }
                print!("{}", table.render());
            }
        }

        if *resets || show_all {
            let rows = ResetTokenManager::recent_resets(&pool, *limit)?;
            header("Password resets");
            if rows.is_empty() {
                info("No password reset requests");
            } else {
                let mut table = Table::new(vec![
                    Column::new("REQUESTED", 19),
                    Column::new("USERNAME", 16),
                    Column::new("EXPIRES", 19),
                    Column::new("USED", 19),
                ]);
                for r in rows {
                    table.add_row(vec![
                        r.created_at,
                        r.username,
                        r.expires_at,
                        r.used_at.unwrap_or_else(|| "--".to_string()),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }
    Ok(())
}
