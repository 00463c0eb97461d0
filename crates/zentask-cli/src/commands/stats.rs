use chrono::Local;
use serde::Serialize;
use zentask_core::{Config, DailySummary, LevelInfo, UserStats};

use super::open_board;

#[derive(Serialize)]
struct StatsReport<'a> {
    today: DailySummary,
    streak: &'a UserStats,
    level: LevelInfo,
}

fn bar(pct: f64) -> String {
    let filled = ((pct / 10.0).round() as usize).min(10);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut board = open_board(&config)?;
    let now = Local::now();
    board.refresh(now)?;

    let report = StatsReport {
        today: board.summary(now.date_naive()),
        streak: board.stats(),
        level: board.level(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let today = &report.today;
    println!(
        "Today:  {}/{} done {} {:.0}%",
        today.completed,
        today.cap,
        bar(today.progress_pct),
        today.progress_pct
    );
    if today.credited {
        println!("        Day complete.");
    } else if today.cap_reached {
        println!("        {} left to finish the day.", today.remaining);
    } else {
        println!("        {} of {} tasks added.", today.created, today.cap);
    }

    let level = &report.level;
    println!("Streak: {} days", level.completed_days);
    match level.days_to_next_level {
        Some(days) => println!(
            "Level:  {} {} {:.0}% ({days} days to level {})",
            level.level,
            bar(level.progress_pct),
            level.progress_pct,
            level.level + 1
        ),
        None => println!("Level:  {} (max)", level.level),
    }
    Ok(())
}
