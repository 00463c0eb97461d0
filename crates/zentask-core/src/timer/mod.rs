mod engine;
mod schedule;

pub use engine::{format_mm_ss, FocusTimer, TimerState};
pub use schedule::{CycleDurations, TimerMode};
