//! Positional priority rule.
//!
//! Position is the only input: the first task is HIGH, the second MEDIUM,
//! everything after LOW. The rule runs over the whole list, including tasks
//! from earlier days.

use super::{Task, TaskPriority};

/// Priority for a given list position.
pub fn priority_for_index(index: usize) -> TaskPriority {
    match index {
        0 => TaskPriority::High,
        1 => TaskPriority::Medium,
        _ => TaskPriority::Low,
    }
}

/// Return `tasks` with priorities recomputed from their order.
pub fn assign_priorities(tasks: Vec<Task>) -> Vec<Task> {
    tasks
        .into_iter()
        .enumerate()
        .map(|(idx, mut task)| {
            task.priority = priority_for_index(idx);
            task
        })
        .collect()
}
