use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimerMode {
    Work,
    Rest,
}

impl TimerMode {
    pub fn next(&self) -> Self {
        match self {
            TimerMode::Work => TimerMode::Rest,
            TimerMode::Rest => TimerMode::Work,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::Rest => "Rest",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Length of each half of the work/rest cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDurations {
    pub work_secs: u64,
    pub rest_secs: u64,
}

impl CycleDurations {
    pub fn from_minutes(work_min: u64, rest_min: u64) -> Self {
        Self {
            work_secs: work_min.saturating_mul(60),
            rest_secs: rest_min.saturating_mul(60),
        }
    }

    pub fn secs_for(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Work => self.work_secs,
            TimerMode::Rest => self.rest_secs,
        }
    }
}

impl Default for CycleDurations {
    /// 25 minutes of work, 5 of rest.
    fn default() -> Self {
        Self::from_minutes(25, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cycle() {
        let d = CycleDurations::default();
        assert_eq!(d.secs_for(TimerMode::Work), 1500);
        assert_eq!(d.secs_for(TimerMode::Rest), 300);
    }

    #[test]
    fn modes_alternate() {
        assert_eq!(TimerMode::Work.next(), TimerMode::Rest);
        assert_eq!(TimerMode::Rest.next(), TimerMode::Work);
    }
}
