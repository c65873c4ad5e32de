use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::users::UserLogic;
use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, Role};
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};
use crate::utils::time::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };
    let pool = open_pool(cfg)?;

    match action {
        UserAction::Add {
            username,
            password,
            email,
            role,
            inactive,
        } => {
            let role = Role::from_db_str(role.trim()).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
            let input = NewUser {
                username: username.trim().to_string(),
                email: email.clone(),
                password: password.clone(),
                role,
                is_active: !inactive,
            };
            let user = UserLogic::create(&pool, &cfg.password_policy, &input, now())?;
            success(format!("User '{}' created (id {})", user.username, user.id));
        }

        UserAction::List => {
            let users = UserLogic::list(&pool)?;
            if users.is_empty() {
                info("No users");
                return Ok(());
            }

            header("Users");
            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("USERNAME", 16),
                Column::new("EMAIL", 28),
                Column::new("ROLE", 6),
                Column::new("ACTIVE", 6),
                Column::new("LAST LOGIN", 19),
            ]);
            for u in users {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username,
                    u.email.unwrap_or_default(),
                    u.role.to_db_str().to_string(),
                    if u.is_active { "yes" } else { "no" }.to_string(),
                    u.last_login.unwrap_or_else(|| "--".to_string()),
                ]);
            }
            print!("{}", table.render());
        }

        UserAction::Passwd { username, password } => {
            let user = UserLogic::require(&pool, username)?;
            UserLogic::update_password(&pool, &cfg.password_policy, user.id, password, now())?;
            success(format!("Password updated for '{}'", user.username));
        }

        UserAction::Activate { username, off } => {
            let user = UserLogic::require(&pool, username)?;
            UserLogic::set_active(&pool, user.id, !off, now())?;
            let state = if *off { "disabled" } else { "enabled" };
            success(format!("User '{}' {}", user.username, state));
        }

        UserAction::Del { username } => {
            let user = UserLogic::require(&pool, username)?;
            UserLogic::delete(&pool, user.id)?;
            success(format!("User '{}' deleted", user.username));
        }
    }

    Ok(())
}
