use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::ToggleOutcome;
use crate::timer::{TimerMode, TimerState};

/// Every state change in the system produces an Event.
/// The CLI prints them; tests match on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and needs acknowledgment.
    CycleCompleted {
        mode: TimerMode,
        next_mode: TimerMode,
        at: DateTime<Utc>,
    },
    /// Acknowledged; the other mode is loaded.
    CycleAdvanced {
        mode: TimerMode,
        duration_secs: u64,
        running: bool,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    TimerSnapshot {
        state: TimerState,
        mode: TimerMode,
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TaskAdded {
        task_id: String,
        title: String,
        at: DateTime<Utc>,
    },
    TaskToggled {
        task_id: String,
        outcome: ToggleOutcome,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskMoved {
        task_id: String,
        to_index: usize,
        at: DateTime<Utc>,
    },
    /// A fully completed day was credited to the streak.
    StreakCredited {
        completed_days: u32,
        level: u8,
        at: DateTime<Utc>,
    },
}
