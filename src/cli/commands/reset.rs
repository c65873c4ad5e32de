use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, ResetAction};
use crate::config::Config;
use crate::core::mailer::{LogMailer, reset_link};
use crate::core::reset::ResetTokenManager;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::ui::messages::{field, info, success};
use crate::utils::time::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Reset { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;
    let manager = ResetTokenManager::from_config(&cfg.security);

    match action {
        ResetAction::Request { email } => {
            manager.request_reset(&pool, &LogMailer, &cfg.app_url, email, now())?;
            // Same answer whether or not the address is known.
            info("If this address belongs to an account, a reset link has been sent.");
        }

        ResetAction::Issue { username } => {
            let user = UserLogic::require(&pool, username)?;
            let raw = manager.issue(&pool, user.id, now())?;
            success(format!("Reset token issued for '{}'", user.username));
            field("Token", &raw);
            field("Link", reset_link(&cfg.app_url, &raw));
            field("Valid for", format!("{} s", manager.expiry_secs));
        }

        ResetAction::Redeem { token, password } => {
            manager.redeem(&mut pool, &cfg.password_policy, token.trim(), password, now())?;
            success("Password changed. Please sign in again.");
        }
    }

    Ok(())
}
