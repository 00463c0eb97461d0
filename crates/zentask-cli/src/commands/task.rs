//! Task management commands for CLI.

use std::io::{self, BufRead, Write};

use chrono::Local;
use clap::{Subcommand, ValueEnum};
use zentask_core::{Board, Config, Database, KvStore, Task, TaskCategory, TaskDraft, TaskFilter, ToggleOutcome};

use super::open_board;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task for today (at most the daily cap per day)
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// WORK, PERSONAL, SHOPPING, HEALTH or OTHER (default from config)
        #[arg(long)]
        category: Option<TaskCategory>,
    },
    /// List tasks in display order
    List {
        /// Which tasks to show
        #[arg(long, value_enum, default_value = "all")]
        filter: ListFilter,
        /// Only tasks created today
        #[arg(long)]
        today: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done, or reopen a done task
    Toggle {
        /// Task ID (or a unique prefix)
        id: String,
        /// Do not ask before marking done
        #[arg(long, short)]
        yes: bool,
    },
    /// Ask to delete a task; run confirm-delete to carry it out
    Delete {
        /// Task ID (or a unique prefix)
        id: String,
    },
    /// Delete the task passed to the last `delete`
    ConfirmDelete,
    /// Forget the pending delete
    CancelDelete,
    /// Move a task to a position (0 = top)
    Reorder {
        /// Task ID (or a unique prefix)
        id: String,
        /// Target index, clamped to the end of the list
        index: usize,
    },
    /// Move a task onto another task's position
    Move {
        /// Task being moved
        id: String,
        /// Task whose position it takes
        over: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListFilter {
    All,
    Active,
    Done,
}

impl From<ListFilter> for TaskFilter {
    fn from(f: ListFilter) -> Self {
        match f {
            ListFilter::All => TaskFilter::All,
            ListFilter::Active => TaskFilter::Active,
            ListFilter::Done => TaskFilter::Done,
        }
    }
}

/// Expand a unique id prefix to the full id.
fn resolve_id<S: KvStore>(board: &Board<S>, id: &str) -> String {
    let mut matches = board.tasks().iter().filter(|t| t.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(task), None) => task.id.clone(),
        _ => id.to_string(),
    }
}

fn short_id(task: &Task) -> &str {
    task.id.get(..8).unwrap_or(&task.id)
}

fn print_line(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    println!(
        "[{mark}] {:<8} {:<6} {:<8} {}",
        short_id(task),
        task.priority,
        task.category,
        task.title
    );
    if let Some(desc) = &task.description {
        println!("                          {desc}");
    }
}

fn confirm_done(task: &Task) -> bool {
    print!("Mark \"{}\" as done? [y/N] ", task.title);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut board = open_board(&config)?;
    let now = Local::now();

    match action {
        TaskAction::Add {
            title,
            description,
            category,
        } => {
            let category = category.unwrap_or(config.tasks.default_category);
            let mut draft = TaskDraft::new(title, category);
            if let Some(d) = description {
                draft = draft.with_description(d);
            }
            let task = board.add_draft(draft, now)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List {
            filter,
            today,
            json,
        } => {
            let date = now.date_naive();
            let tasks: Vec<_> = board
                .filtered(filter.into())
                .into_iter()
                .filter(|t| !today || t.created_on() == Some(date))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                tasks.into_iter().for_each(print_line);
            }
        }
        TaskAction::Toggle { id, yes } => {
            let id = resolve_id(&board, &id);
            let outcome = board.toggle_task(&id, |t| yes || confirm_done(t), now)?;
            match outcome {
                ToggleOutcome::Completed => println!("Task completed: {id}"),
                ToggleOutcome::Reopened => println!("Task reopened: {id}"),
                ToggleOutcome::Declined => println!("Unchanged."),
                ToggleOutcome::NotFound => println!("Task not found: {id}"),
            }
            report_streak(&mut board);
        }
        TaskAction::Delete { id } => {
            let id = resolve_id(&board, &id);
            if board.request_delete(&id)? {
                let title = board.registry().get(&id).map(|t| t.title.as_str()).unwrap_or_default();
                println!("Delete \"{title}\"? Run `zentask task confirm-delete` to confirm.");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::ConfirmDelete => match board.confirm_delete(now)? {
            Some(task) => println!("Task deleted: {}", task.id),
            None => println!("Nothing to delete."),
        },
        TaskAction::CancelDelete => {
            board.cancel_delete()?;
            println!("Delete cancelled.");
        }
        TaskAction::Reorder { id, index } => {
            let id = resolve_id(&board, &id);
            if board.reorder(&id, index, now)? {
                board.tasks().iter().for_each(print_line);
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Move { id, over } => {
            let id = resolve_id(&board, &id);
            let over = resolve_id(&board, &over);
            if board.move_onto(&id, &over, now)? {
                board.tasks().iter().for_each(print_line);
            } else {
                println!("Nothing moved.");
            }
        }
    }
    Ok(())
}

fn report_streak(board: &mut Board<Database>) {
    let credited = board
        .take_events()
        .into_iter()
        .any(|e| matches!(e, zentask_core::Event::StreakCredited { .. }));
    if credited {
        let level = board.level();
        println!(
            "Day complete! {} days in total, level {}.",
            level.completed_days, level.level
        );
    }
}
