use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entries::EntryLogic;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::models::entry::{EntryInput, InsertOutcome};
use crate::ui::messages::{success, warning};
use crate::utils::time::{duration_str, now};
use crate::utils::mins2readable;

/// Handle the `add` command (new entry, or `--edit <id>` to replace one).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        user,
        date,
        start,
        end,
        kind,
        description,
        edit,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let actor = UserLogic::require(&pool, user)?;

        let input = EntryInput {
            date: date.clone(),
            start_time: start.clone(),
            end_time: end.clone(),
            category: kind.clone(),
            description: description.clone(),
        };

        let outcome = match edit {
            Some(id) => EntryLogic::update(&pool, &cfg.work, &actor, *id, &input, now())?,
            None => EntryLogic::create(&pool, &cfg.work, &actor, &input, now())?,
        };

        match outcome {
            InsertOutcome::Inserted(id) => {
                let mins = duration_str(start.trim(), end.trim())?;
                let verb = if edit.is_some() { "Updated" } else { "Added" };
                success(format!(
                    "{verb} entry {id}: {} {} {}-{} ({})",
                    kind.trim().to_lowercase(),
                    date.trim(),
                    start.trim(),
                    end.trim(),
                    mins2readable(mins, false, false)
                ));
            }
            InsertOutcome::Skipped => {
                warning("Identical entry already exists, skipped");
            }
        }
    }

    Ok(())
}
