//! Ordered task list with the daily creation cap.
//!
//! Structural mutations (add, delete, reorder) rerun the positional priority
//! rule over the whole list. Toggling only flips the completion flag.
//!
//! Mutations never evaluate streaks themselves; [`crate::board::Board`] does
//! that explicitly after each call.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::priority::assign_priorities;
use super::{Task, TaskCategory, TaskDraft, TaskError};

/// Result of [`TaskRegistry::toggle_task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Completed,
    Reopened,
    /// Completion was not confirmed; nothing changed.
    Declined,
    NotFound,
}

impl ToggleOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ToggleOutcome::Completed | ToggleOutcome::Reopened)
    }
}

/// List view filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Done,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Done => task.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    daily_cap: usize,
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DAILY_CAP)
    }
}

impl TaskRegistry {
    pub const DEFAULT_DAILY_CAP: usize = 2;

    pub fn new(daily_cap: usize) -> Self {
        Self {
            tasks: Vec::new(),
            daily_cap,
        }
    }

    /// Wrap a previously persisted list as-is.
    pub fn from_tasks(tasks: Vec<Task>, daily_cap: usize) -> Self {
        Self { tasks, daily_cap }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn daily_cap(&self) -> usize {
        self.daily_cap
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Tasks whose creation timestamp falls on `date` (local time).
    pub fn tasks_created_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.created_on() == Some(date))
            .collect()
    }

    pub fn completed_count_on(&self, date: NaiveDate) -> usize {
        self.tasks_created_on(date)
            .into_iter()
            .filter(|t| t.completed)
            .count()
    }

    pub fn cap_reached_on(&self, date: NaiveDate) -> bool {
        self.tasks_created_on(date).len() >= self.daily_cap
    }

    /// How many more tasks must be completed on `date` to meet the cap.
    pub fn remaining_on(&self, date: NaiveDate) -> usize {
        self.daily_cap.saturating_sub(self.completed_count_on(date))
    }

    /// Completed share of the daily cap, 0..=100.
    pub fn daily_progress_pct(&self, date: NaiveDate) -> f64 {
        if self.daily_cap == 0 {
            return 0.0;
        }
        let done = self.completed_count_on(date) as f64;
        (done / self.daily_cap as f64 * 100.0).min(100.0)
    }

    pub fn filtered(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add a task with only a title.
    pub fn add_task(
        &mut self,
        title: &str,
        category: TaskCategory,
        now: DateTime<Local>,
    ) -> Result<&Task, TaskError> {
        self.add_draft(TaskDraft::new(title, category), now)
    }

    /// Add a task at the front of the list.
    ///
    /// # Errors
    /// [`TaskError::EmptyTitle`] for a blank title and
    /// [`TaskError::DailyCapReached`] when today's cap is used up. The list
    /// is untouched in both cases.
    pub fn add_draft(&mut self, draft: TaskDraft, now: DateTime<Local>) -> Result<&Task, TaskError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        if self.cap_reached_on(now.date_naive()) {
            debug!(cap = self.daily_cap, "daily cap reached, task rejected");
            return Err(TaskError::DailyCapReached {
                cap: self.daily_cap,
            });
        }

        let mut task = Task::new(title, draft.category, now);
        task.description = draft.description;
        debug!(id = %task.id, "task added");

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task);
        next.append(&mut self.tasks);
        self.tasks = assign_priorities(next);
        Ok(&self.tasks[0])
    }

    /// Flip a task's completion flag.
    ///
    /// Completing asks `confirm` first; reopening does not. Priorities are
    /// left alone.
    pub fn toggle_task<F>(&mut self, id: &str, confirm: F) -> ToggleOutcome
    where
        F: FnOnce(&Task) -> bool,
    {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return ToggleOutcome::NotFound;
        };
        if task.completed {
            task.completed = false;
            debug!(id, "task reopened");
            return ToggleOutcome::Reopened;
        }
        if !confirm(task) {
            return ToggleOutcome::Declined;
        }
        task.completed = true;
        debug!(id, "task completed");
        ToggleOutcome::Completed
    }

    /// Remove a task and rerun the priority rule. Returns the removed task.
    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let idx = self.position(id)?;
        let removed = self.tasks.remove(idx);
        self.tasks = assign_priorities(std::mem::take(&mut self.tasks));
        debug!(id, "task deleted");
        Some(removed)
    }

    /// Move a task to `new_index` (clamped to the last slot).
    pub fn reorder(&mut self, id: &str, new_index: usize) -> bool {
        let Some(old_index) = self.position(id) else {
            return false;
        };
        let target = new_index.min(self.tasks.len() - 1);
        let task = self.tasks.remove(old_index);
        self.tasks.insert(target, task);
        self.tasks = assign_priorities(std::mem::take(&mut self.tasks));
        debug!(id, from = old_index, to = target, "task reordered");
        true
    }

    /// Drop `active_id` onto the slot currently held by `over_id`.
    pub fn move_onto(&mut self, active_id: &str, over_id: &str) -> bool {
        if active_id == over_id {
            return false;
        }
        match (self.position(active_id), self.position(over_id)) {
            (Some(_), Some(target)) => self.reorder(active_id, target),
            _ => false,
        }
    }
}
