use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::core::users::UserLogic;
use crate::errors::{AppError, AppResult};
use crate::models::period_stats::{Period, PeriodStats};
use crate::ui::messages::{field, header};
use crate::utils::colors::{RESET, color_for_delta, colorize_optional};
use crate::utils::date::{parse_date, today};
use crate::utils::formatting::{pad_right, progress_bar};
use crate::utils::mins2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        period,
        date,
        user,
        json,
    } = cmd
    {
        let period = Period::from_input(period).ok_or_else(|| {
            AppError::Other(format!("Unknown period '{period}' (use day, week, month or year)"))
        })?;
        let reference = match date {
            Some(d) => parse_date(d.trim()).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today(),
        };

        let pool = open_pool(cfg)?;
        let owner = match user {
            Some(name) => Some(UserLogic::require(&pool, name)?.id),
            None => None,
        };

        let stats = StatsLogic::for_period(&pool, &cfg.work, period, reference, owner)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print_stats(period, &stats);
        }
    }
    Ok(())
}

fn print_stats(period: Period, s: &PeriodStats) {
    header(format!(
        "Statistics ({}) {} .. {}",
        period.label(),
        s.start_date,
        s.end_date
    ));

    field("Work", mins2readable(s.work_minutes, false, false));
    field("Course", colorize_optional(&mins2readable(s.course_minutes, false, false)));
    field("Break", colorize_optional(&mins2readable(s.break_minutes, false, false)));
    field("Net", mins2readable(s.net_minutes, false, false));
    field("Target", mins2readable(s.target_minutes, false, false));
    field(
        "Delta",
        format!(
            "{}{}{}",
            color_for_delta(s.delta_minutes),
            mins2readable(s.delta_minutes, true, false),
            RESET
        ),
    );
    field("Completion", progress_bar(s.percentage, 20));

    if !s.by_day.is_empty() {
        println!();
        for (day, mins) in &s.by_day {
            println!(
                "  {} {}",
                pad_right(&day.format("%a %Y-%m-%d").to_string(), 15),
                mins2readable(*mins, false, true)
            );
        }
    }
}
