use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entries::EntryLogic;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, user } = cmd {
        let pool = open_pool(cfg)?;
        let actor = UserLogic::require(&pool, user)?;
        let removed = EntryLogic::delete(&pool, &actor, *id)?;

        success(format!(
            "Deleted entry {} ({} {} {}-{})",
            removed.id,
            removed.category.to_db_str(),
            removed.date,
            removed.start_str(),
            removed.end_str()
        ));
    }
    Ok(())
}
