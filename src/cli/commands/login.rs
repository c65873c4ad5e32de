use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::{AuthFlow, LoginOutcome};
use crate::errors::AppResult;
use crate::ui::messages::{error, field, success, warning};
use crate::utils::time::{format_timestamp, now};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login {
        user,
        password,
        ip,
        replace,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let flow = AuthFlow::from_config(cfg);

        match flow.login(&pool, user, password, ip, now(), replace.as_deref())? {
            LoginOutcome::Locked => {
                warning("Too many failed attempts. Please wait before trying again.");
            }
            LoginOutcome::Rejected => {
                error("Invalid username or password");
            }
            LoginOutcome::Authenticated { session, user } => {
                success(format!("Signed in as {} ({})", user.username, user.role.to_db_str()));
                field("Session", &session.id);
                field("CSRF", &session.csrf_secret);
                field("Bound IP", &session.bound_ip);
                field("Login time", format_timestamp(&session.login_time));
            }
        }
    }
    Ok(())
}
