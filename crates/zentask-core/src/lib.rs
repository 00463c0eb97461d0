//! # Zentask Core Library
//!
//! Core business logic for Zentask, a minimalist daily task board with a
//! focus timer. Everything the `zentask` binary does goes through this
//! crate; the CLI is a thin shell over it.
//!
//! ## Architecture
//!
//! - **Tasks**: An ordered task list with a per-day creation cap, positional
//!   priorities and a two-phase delete
//! - **Streak**: Counts days on which the daily quota was completed and
//!   derives a level from that count
//! - **Board**: Owns tasks and streak counters; every mutation re-checks the
//!   streak and overwrites the persisted slots
//! - **Timer**: A tick-driven WORK/REST countdown the caller advances once
//!   per second
//! - **Planner**: Turns a free-text goal into task proposals through a
//!   generative model
//! - **Storage**: SQLite key-value slots and TOML configuration
//!
//! ## Key Components
//!
//! - [`Board`]: Task list plus streak bookkeeping and persistence
//! - [`FocusTimer`]: Countdown state machine
//! - [`GeminiPlanner`]: [`TaskPlanner`] backed by the Generative Language API
//! - [`Database`]: Persistent [`KvStore`]
//! - [`Config`]: Application configuration management

pub mod board;
pub mod error;
pub mod events;
pub mod planner;
pub mod storage;
pub mod streak;
pub mod task;
pub mod timer;

pub use board::{Board, DailySummary};
pub use error::{ConfigError, CoreError, PlannerError, Result, StorageError};
pub use events::Event;
pub use planner::{GeminiPlanner, Plan, PlanRequest, PlannedTask, TaskPlanner};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use streak::{LevelInfo, StreakTracker, UserStats};
pub use task::{
    DeleteConfirmation, Task, TaskCategory, TaskDraft, TaskError, TaskFilter, TaskPriority,
    TaskRegistry, ToggleOutcome,
};
pub use timer::{CycleDurations, FocusTimer, TimerMode, TimerState};
