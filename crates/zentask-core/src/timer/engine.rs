//! Focus timer state machine.
//!
//! The timer has no thread of its own - the caller drives it by calling
//! `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Paused <-> Running -> AwaitingAck --acknowledge--> (Running | Paused), next mode
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = FocusTimer::new(CycleDurations::default(), true);
//! timer.start();
//! // Once per second:
//! if let Some(Event::CycleCompleted { .. }) = timer.tick() {
//!     timer.acknowledge();
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::schedule::{CycleDurations, TimerMode};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Running,
    Paused,
    /// Countdown hit zero; waiting for the user to acknowledge.
    AwaitingAck,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    durations: CycleDurations,
    mode: TimerMode,
    running: bool,
    remaining_secs: u64,
    awaiting_ack: bool,
    /// Resume automatically after the user acknowledges a finished cycle.
    auto_resume: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(CycleDurations::default(), true)
    }
}

impl FocusTimer {
    /// Starts paused in work mode with the full work duration.
    pub fn new(durations: CycleDurations, auto_resume: bool) -> Self {
        Self {
            durations,
            mode: TimerMode::Work,
            running: false,
            remaining_secs: durations.work_secs,
            awaiting_ack: false,
            auto_resume,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.awaiting_ack {
            TimerState::AwaitingAck
        } else if self.running {
            TimerState::Running
        } else {
            TimerState::Paused
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn durations(&self) -> CycleDurations {
        self.durations
    }

    /// Remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }

    pub fn snapshot(&self) -> Event {
        Event::TimerSnapshot {
            state: self.state(),
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            total_secs: self.durations.secs_for(self.mode),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.awaiting_ack {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Account for one elapsed second.
    ///
    /// Returns `Some(Event::CycleCompleted)` when the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.running = false;
        self.awaiting_ack = true;
        Some(Event::CycleCompleted {
            mode: self.mode,
            next_mode: self.mode.next(),
            at: Utc::now(),
        })
    }

    /// Confirm a finished cycle and switch to the other mode.
    pub fn acknowledge(&mut self) -> Option<Event> {
        if !self.awaiting_ack {
            return None;
        }
        self.awaiting_ack = false;
        self.mode = self.mode.next();
        self.remaining_secs = self.durations.secs_for(self.mode);
        self.running = self.auto_resume;
        Some(Event::CycleAdvanced {
            mode: self.mode,
            duration_secs: self.remaining_secs,
            running: self.running,
            at: Utc::now(),
        })
    }

    /// Back to the initial paused work cycle.
    pub fn reset(&mut self) -> Option<Event> {
        self.mode = TimerMode::Work;
        self.running = false;
        self.awaiting_ack = false;
        self.remaining_secs = self.durations.work_secs;
        Some(Event::TimerReset { at: Utc::now() })
    }
}

pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
