use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthFlow;
use crate::errors::AppResult;
use crate::models::session::SessionCheck;
use crate::ui::messages::{field, info, success, warning};
use crate::utils::time::{format_timestamp, now};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { id, ip, logout } = cmd {
        let pool = open_pool(cfg)?;
        let flow = AuthFlow::from_config(cfg);

        if *logout {
            if flow.logout(&pool, id)? {
                success("Signed out");
            } else {
                info("No such session");
            }
            return Ok(());
        }

        let check = flow.guard.check(&pool, id, ip, now())?;
        match &check {
            SessionCheck::Valid(s) => {
                success("Session is valid");
                field("User id", s.user_id);
                field("Role", s.role.to_db_str());
                field("Last activity", format_timestamp(&s.last_activity));
            }
            SessionCheck::Anonymous => info("No such session"),
            SessionCheck::Expired | SessionCheck::IpMismatch => {
                if let Some(msg) = check.reauth_message() {
                    warning(msg);
                }
            }
        }
    }
    Ok(())
}
