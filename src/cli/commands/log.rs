use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::{LogRow, load_log};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use ansi_term::Colour;

const OP_WIDTH: usize = 60;

/// Colour of the operation column.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "entry_add" | "user_create" | "user_activate" => Colour::Green,
        "entry_delete" | "user_delete" | "user_deactivate" => Colour::Red,
        "entry_update" => Colour::Yellow,
        "login" | "logout" => Colour::Cyan,
        "login_locked" => Colour::RGB(255, 153, 51),
        "password_reset" | "password_reset_request" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = open_pool(cfg)?;
        let rows = load_log(&pool.conn)?;
        print_log(&rows);
    }
    Ok(())
}

fn print_log(rows: &[LogRow]) {
    if rows.is_empty() {
        info("Internal log is empty");
        return;
    }

    let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);

    header("Internal log");
    for r in rows {
        let date = chrono::DateTime::parse_from_rfc3339(&r.date)
            .map(|dt| dt.format("%F %T").to_string())
            .unwrap_or_else(|_| r.date.clone());

        let mut label = if r.target.is_empty() {
            r.operation.clone()
        } else {
            format!("{} ({})", r.operation, r.target)
        };
        if label.chars().count() > OP_WIDTH {
            label = label.chars().take(OP_WIDTH - 3).collect::<String>() + "...";
        }

        // Pad on the plain text, then paint only the operation word.
        let padding = " ".repeat(OP_WIDTH.saturating_sub(label.chars().count()));
        let painted = match label.split_once(' ') {
            Some((op, rest)) => format!("{} {}", color_for_operation(&r.operation).paint(op), rest),
            None => color_for_operation(&r.operation).paint(label.as_str()).to_string(),
        };

        println!(
            "{:>id_w$}: {} | {}{} => {}",
            r.id,
            date,
            painted,
            padding,
            r.message,
            id_w = id_w
        );
    }
}
