use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entries::EntryLogic;
use crate::core::users::UserLogic;
use crate::errors::{AppError, AppResult};
use crate::models::category::EntryCategory;
use crate::models::entry::EntryFilter;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use crate::utils::mins2readable;
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        user,
        from,
        to,
        kind,
    } = cmd
    {
        let pool = open_pool(cfg)?;

        let owner = match user {
            Some(name) => Some(UserLogic::require(&pool, name)?),
            None => None,
        };

        let filter = EntryFilter {
            from: parse_opt_date(from)?,
            to: parse_opt_date(to)?,
            category: match kind {
                Some(k) => Some(
                    EntryCategory::from_input(k).ok_or_else(|| AppError::InvalidCategory(k.clone()))?,
                ),
                None => None,
            },
            user_id: owner.as_ref().map(|u| u.id),
        };

        let entries = EntryLogic::list(&pool, &filter)?;
        if entries.is_empty() {
            info("No entries");
            return Ok(());
        }

        let names: HashMap<i64, String> = UserLogic::list(&pool)?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        header("Entries");
        let mut table = Table::new(vec![
            Column::new("ID", 5),
            Column::new("DATE", 10),
            Column::new("USER", 12),
            Column::new("TYPE", 6),
            Column::new("START", 5),
            Column::new("END", 5),
            Column::new("DURATION", 8),
            Column::new("DESCRIPTION", 30),
        ]);

        for e in &entries {
            let duration = mins2readable(e.duration_minutes(), false, true);
            let kind_cell = match e.category {
                EntryCategory::Break => format!("{GREY}{:<6}{RESET}", e.category.to_db_str()),
                EntryCategory::Course => format!("{YELLOW}{:<6}{RESET}", e.category.to_db_str()),
                EntryCategory::Work => e.category.to_db_str().to_string(),
            };
            table.add_row(vec![
                e.id.to_string(),
                e.date.to_string(),
                names.get(&e.user_id).cloned().unwrap_or_else(|| e.user_id.to_string()),
                kind_cell,
                e.start_str(),
                e.end_str(),
                duration,
                e.description.clone(),
            ]);
        }
        print!("{}", table.render());
        info(format!("{} entries", entries.len()));
    }
    Ok(())
}

fn parse_opt_date(value: &Option<String>) -> AppResult<Option<chrono::NaiveDate>> {
    match value {
        Some(s) => parse_date(s.trim())
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(None),
    }
}
