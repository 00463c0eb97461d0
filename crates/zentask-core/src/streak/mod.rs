//! Completed-day streak tracking.
//!
//! A day counts once both of that day's tasks are done. The stored
//! `last_completion_date` guards against crediting the same date twice, so
//! re-evaluating or toggling a task off and on again is harmless. There is no
//! decrement path.

mod level;

pub use level::{LevelInfo, LEVEL_THRESHOLDS, MAX_LEVEL};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::task::TaskRegistry;

/// Format used for `last_completion_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Persisted streak counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub completed_days_count: u32,
    /// ISO date (`YYYY-MM-DD`) of the last credited day.
    #[serde(default)]
    pub last_completion_date: Option<String>,
}

impl UserStats {
    pub fn level(&self) -> LevelInfo {
        LevelInfo::from_days(self.completed_days_count)
    }

    pub fn credited_on(&self, date: NaiveDate) -> bool {
        self.last_completion_date.as_deref() == Some(date.format(DATE_FORMAT).to_string().as_str())
    }
}

/// Decides whether the current day earns a streak credit.
#[derive(Debug, Clone, Copy)]
pub struct StreakTracker {
    required_tasks: usize,
}

impl Default for StreakTracker {
    fn default() -> Self {
        Self::new(TaskRegistry::DEFAULT_DAILY_CAP)
    }
}

impl StreakTracker {
    /// `required_tasks` is the exact number of same-day tasks that must all
    /// be complete; it follows the daily cap.
    pub fn new(required_tasks: usize) -> Self {
        Self { required_tasks }
    }

    /// Whether `today`'s quota is fully met, ignoring prior credits.
    pub fn quota_met(&self, registry: &TaskRegistry, today: NaiveDate) -> bool {
        let todays = registry.tasks_created_on(today);
        self.required_tasks > 0
            && todays.len() == self.required_tasks
            && todays.iter().all(|t| t.completed)
    }

    /// Credit `today` if its quota is met and it was not credited already.
    ///
    /// Returns `true` when `stats` changed.
    pub fn evaluate(&self, registry: &TaskRegistry, stats: &mut UserStats, today: NaiveDate) -> bool {
        if !self.quota_met(registry, today) || stats.credited_on(today) {
            return false;
        }
        stats.completed_days_count = stats.completed_days_count.saturating_add(1);
        stats.last_completion_date = Some(today.format(DATE_FORMAT).to_string());
        info!(
            days = stats.completed_days_count,
            date = %today,
            "streak day credited"
        );
        true
    }
}
