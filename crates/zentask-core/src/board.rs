//! The task board: registry, streak counters and persistence in one owner.
//!
//! Every mutating call follows the same three steps:
//!
//! 1. apply the change to the [`TaskRegistry`]
//! 2. run [`StreakTracker::evaluate`] for the current day
//! 3. overwrite both persisted slots
//!
//! Steps 2 and 3 are explicit calls in [`Board::commit`], not watchers, so
//! their order never depends on who observed the change first.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::events::Event;
use crate::planner::Plan;
use crate::storage::snapshot::{load_pending_delete, save_pending_delete};
use crate::storage::{BoardSnapshot, KvStore, TasksConfig};
use crate::streak::{LevelInfo, StreakTracker, UserStats};
use crate::task::{
    DeleteConfirmation, Task, TaskCategory, TaskDraft, TaskFilter, TaskRegistry, ToggleOutcome,
};

/// Today's progress for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub created: usize,
    pub completed: usize,
    pub cap: usize,
    pub progress_pct: f64,
    /// Completions still needed to meet the cap.
    pub remaining: usize,
    pub cap_reached: bool,
    /// Whether this date already counted towards the streak.
    pub credited: bool,
}

pub struct Board<S: KvStore> {
    store: S,
    registry: TaskRegistry,
    stats: UserStats,
    tracker: StreakTracker,
    default_category: TaskCategory,
    pending_delete: DeleteConfirmation,
    events: Vec<Event>,
}

impl<S: KvStore> Board<S> {
    /// Load the board from `store`.
    ///
    /// # Errors
    /// Fails only if the store itself cannot be read.
    pub fn open(store: S, config: &TasksConfig) -> Result<Self> {
        let snapshot = BoardSnapshot::load(&store)?;
        let pending_delete = load_pending_delete(&store)?;
        debug!(tasks = snapshot.tasks.len(), "board loaded");
        Ok(Self {
            registry: TaskRegistry::from_tasks(snapshot.tasks, config.daily_cap),
            stats: snapshot.stats,
            tracker: StreakTracker::new(config.daily_cap),
            default_category: config.default_category,
            pending_delete,
            events: Vec::new(),
            store,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn tasks(&self) -> &[Task] {
        self.registry.tasks()
    }

    pub fn filtered(&self, filter: TaskFilter) -> Vec<&Task> {
        self.registry.filtered(filter)
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn level(&self) -> LevelInfo {
        self.stats.level()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.pending()
    }

    pub fn summary(&self, today: NaiveDate) -> DailySummary {
        DailySummary {
            date: today,
            created: self.registry.tasks_created_on(today).len(),
            completed: self.registry.completed_count_on(today),
            cap: self.registry.daily_cap(),
            progress_pct: self.registry.daily_progress_pct(today),
            remaining: self.registry.remaining_on(today),
            cap_reached: self.registry.cap_reached_on(today),
            credited: self.stats.credited_on(today),
        }
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of the persisted state.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tasks: self.registry.tasks().to_vec(),
            stats: self.stats.clone(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Quick-add a task with the configured default category.
    ///
    /// # Errors
    /// [`crate::CoreError::Task`] when the title is blank or the cap is
    /// reached; the board is unchanged in that case.
    pub fn add_task(&mut self, title: &str, now: DateTime<Local>) -> Result<Task> {
        self.add_draft(TaskDraft::new(title, self.default_category), now)
    }

    pub fn add_draft(&mut self, draft: TaskDraft, now: DateTime<Local>) -> Result<Task> {
        let task = self.registry.add_draft(draft, now)?.clone();
        self.events.push(Event::TaskAdded {
            task_id: task.id.clone(),
            title: task.title.clone(),
            at: Utc::now(),
        });
        self.commit(now)?;
        Ok(task)
    }

    /// Toggle completion. `confirm` is asked before marking a task done.
    pub fn toggle_task<F>(&mut self, id: &str, confirm: F, now: DateTime<Local>) -> Result<ToggleOutcome>
    where
        F: FnOnce(&Task) -> bool,
    {
        let outcome = self.registry.toggle_task(id, confirm);
        if outcome.changed() {
            self.events.push(Event::TaskToggled {
                task_id: id.to_string(),
                outcome,
                at: Utc::now(),
            });
            self.commit(now)?;
        }
        Ok(outcome)
    }

    /// Remove a task immediately.
    pub fn delete_task(&mut self, id: &str, now: DateTime<Local>) -> Result<Option<Task>> {
        let removed = self.registry.delete_task(id);
        if removed.is_some() {
            self.events.push(Event::TaskDeleted {
                task_id: id.to_string(),
                at: Utc::now(),
            });
            self.commit(now)?;
        }
        Ok(removed)
    }

    /// Arm a deletion for `id`. Returns false for an unknown id.
    pub fn request_delete(&mut self, id: &str) -> Result<bool> {
        if self.registry.get(id).is_none() {
            return Ok(false);
        }
        self.pending_delete.arm(id);
        save_pending_delete(&self.store, &self.pending_delete)?;
        Ok(true)
    }

    /// Execute the armed deletion, if any.
    pub fn confirm_delete(&mut self, now: DateTime<Local>) -> Result<Option<Task>> {
        let Some(id) = self.pending_delete.confirm() else {
            return Ok(None);
        };
        save_pending_delete(&self.store, &self.pending_delete)?;
        self.delete_task(&id, now)
    }

    pub fn cancel_delete(&mut self) -> Result<()> {
        self.pending_delete.cancel();
        save_pending_delete(&self.store, &self.pending_delete)
    }

    pub fn reorder(&mut self, id: &str, new_index: usize, now: DateTime<Local>) -> Result<bool> {
        if !self.registry.reorder(id, new_index) {
            return Ok(false);
        }
        self.push_moved(id);
        self.commit(now)?;
        Ok(true)
    }

    /// Drag-and-drop style move onto another task's slot.
    pub fn move_onto(&mut self, active_id: &str, over_id: &str, now: DateTime<Local>) -> Result<bool> {
        if !self.registry.move_onto(active_id, over_id) {
            return Ok(false);
        }
        self.push_moved(active_id);
        self.commit(now)?;
        Ok(true)
    }

    /// Add as many planned tasks as today's cap allows, most important first.
    ///
    /// The most important task ends up at the top of the list.
    pub fn accept_plan(&mut self, plan: &Plan, now: DateTime<Local>) -> Result<Vec<Task>> {
        let today = now.date_naive();
        let slots = self
            .registry
            .daily_cap()
            .saturating_sub(self.registry.tasks_created_on(today).len());
        let drafts: Vec<_> = plan.drafts_by_priority().into_iter().take(slots).collect();

        let mut added = Vec::with_capacity(drafts.len());
        for draft in drafts.into_iter().rev() {
            added.push(self.add_draft(draft, now)?);
        }
        added.reverse();
        Ok(added)
    }

    /// Re-run the streak check without a mutation, e.g. right after loading.
    pub fn refresh(&mut self, now: DateTime<Local>) -> Result<bool> {
        let before = self.stats.completed_days_count;
        self.commit(now)?;
        Ok(self.stats.completed_days_count != before)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn push_moved(&mut self, id: &str) {
        if let Some(to_index) = self.registry.position(id) {
            self.events.push(Event::TaskMoved {
                task_id: id.to_string(),
                to_index,
                at: Utc::now(),
            });
        }
    }

    /// Post-mutation hook: streak evaluation, then persistence.
    fn commit(&mut self, now: DateTime<Local>) -> Result<()> {
        if self.tracker.evaluate(&self.registry, &mut self.stats, now.date_naive()) {
            self.events.push(Event::StreakCredited {
                completed_days: self.stats.completed_days_count,
                level: self.stats.level().level,
                at: Utc::now(),
            });
        }
        self.snapshot().save(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, TASKS_KEY};
    use crate::task::{TaskError, TaskPriority};
    use crate::CoreError;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    fn board() -> Board<MemoryStore> {
        Board::open(MemoryStore::new(), &TasksConfig::default()).unwrap()
    }

    #[test]
    fn add_persists_and_emits() {
        let mut b = board();
        let task = b.add_task("Write", at(10, 9)).unwrap();
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.category, TaskCategory::Other);
        assert!(b.store().kv_get(TASKS_KEY).unwrap().unwrap().contains("Write"));
        assert!(matches!(b.take_events().as_slice(), [Event::TaskAdded { .. }]));
        assert!(b.take_events().is_empty());
    }

    #[test]
    fn rejected_add_leaves_board_untouched() {
        let mut b = board();
        b.add_task("one", at(10, 9)).unwrap();
        b.add_task("two", at(10, 9)).unwrap();
        b.take_events();
        let err = b.add_task("three", at(10, 10)).unwrap_err();
        assert!(matches!(err, CoreError::Task(TaskError::DailyCapReached { cap: 2 })));
        assert_eq!(b.tasks().len(), 2);
        assert!(b.take_events().is_empty());
    }

    #[test]
    fn completing_both_credits_streak_once() {
        let mut b = board();
        let first = b.add_task("one", at(10, 9)).unwrap().id;
        let second = b.add_task("two", at(10, 9)).unwrap().id;
        b.toggle_task(&first, |_| true, at(10, 11)).unwrap();
        b.toggle_task(&second, |_| true, at(10, 11)).unwrap();
        assert_eq!(b.stats().completed_days_count, 1);
        assert!(b
            .take_events()
            .iter()
            .any(|e| matches!(e, Event::StreakCredited { completed_days: 1, .. })));

        b.toggle_task(&second, |_| true, at(10, 12)).unwrap();
        b.toggle_task(&second, |_| true, at(10, 12)).unwrap();
        assert!(!b.refresh(at(10, 13)).unwrap());
        assert_eq!(b.stats().completed_days_count, 1);
        assert!(b.summary(at(10, 13).date_naive()).credited);
    }

    #[test]
    fn declined_toggle_is_not_persisted() {
        let mut b = board();
        let id = b.add_task("one", at(10, 9)).unwrap().id;
        b.take_events();
        let outcome = b.toggle_task(&id, |_| false, at(10, 9)).unwrap();
        assert_eq!(outcome, ToggleOutcome::Declined);
        assert!(b.take_events().is_empty());
    }

    #[test]
    fn two_phase_delete() {
        let mut b = board();
        let id = b.add_task("one", at(10, 9)).unwrap().id;
        assert!(!b.request_delete("missing").unwrap());
        assert!(b.request_delete(&id).unwrap());
        assert_eq!(b.pending_delete(), Some(id.as_str()));

        b.cancel_delete().unwrap();
        assert!(b.confirm_delete(at(10, 9)).unwrap().is_none());
        assert_eq!(b.tasks().len(), 1);

        b.request_delete(&id).unwrap();
        let removed = b.confirm_delete(at(10, 9)).unwrap().unwrap();
        assert_eq!(removed.id, id);
        assert!(b.tasks().is_empty());
        assert!(b.pending_delete().is_none());
    }

    #[test]
    fn pending_delete_survives_reopen() {
        let store = MemoryStore::new();
        let id = {
            let mut b = Board::open(&store, &TasksConfig::default()).unwrap();
            let id = b.add_task("one", at(10, 9)).unwrap().id;
            b.request_delete(&id).unwrap();
            id
        };
        let mut b = Board::open(&store, &TasksConfig::default()).unwrap();
        assert_eq!(b.pending_delete(), Some(id.as_str()));
        assert!(b.confirm_delete(at(10, 9)).unwrap().is_some());
    }

    #[test]
    fn reorder_emits_move() {
        let mut b = board();
        let c = b.add_task("C", at(9, 9)).unwrap().id;
        b.add_task("B", at(10, 9)).unwrap();
        b.add_task("A", at(10, 9)).unwrap();
        b.take_events();
        assert!(b.reorder(&c, 0, at(10, 10)).unwrap());
        let titles: Vec<_> = b.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
        assert!(matches!(
            b.take_events().as_slice(),
            [Event::TaskMoved { to_index: 0, .. }]
        ));
        assert!(!b.reorder("missing", 0, at(10, 10)).unwrap());
    }

    #[test]
    fn summary_reports_progress() {
        let mut b = board();
        let id = b.add_task("one", at(10, 9)).unwrap().id;
        b.toggle_task(&id, |_| true, at(10, 9)).unwrap();
        let s = b.summary(at(10, 12).date_naive());
        assert_eq!(s.created, 1);
        assert_eq!(s.completed, 1);
        assert_eq!(s.progress_pct, 50.0);
        assert_eq!(s.remaining, 1);
        assert!(!s.cap_reached);
        assert!(!s.credited);
    }
}
