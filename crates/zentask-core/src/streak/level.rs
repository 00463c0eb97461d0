//! Cosmetic level derived from completed days.

use serde::{Deserialize, Serialize};

/// Completed-day counts at which levels 2, 3 and 4 begin.
pub const LEVEL_THRESHOLDS: [u32; 3] = [30, 60, 90];

pub const MAX_LEVEL: u8 = 4;

/// Level snapshot for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u8,
    pub completed_days: u32,
    /// Progress towards the next level, 0.0 ..= 100.0.
    pub progress_pct: f64,
    /// `None` once the top level is reached.
    pub days_to_next_level: Option<u32>,
}

impl LevelInfo {
    pub fn from_days(days: u32) -> Self {
        let level = level_for(days);
        Self {
            level,
            completed_days: days,
            progress_pct: progress_pct(days),
            days_to_next_level: next_threshold(level).map(|t| t - days),
        }
    }

    pub fn is_max(&self) -> bool {
        self.level == MAX_LEVEL
    }
}

pub fn level_for(days: u32) -> u8 {
    1 + LEVEL_THRESHOLDS.iter().filter(|&&t| days >= t).count() as u8
}

fn floor_for(level: u8) -> u32 {
    match level {
        1 => 0,
        n => LEVEL_THRESHOLDS[usize::from(n) - 2],
    }
}

fn next_threshold(level: u8) -> Option<u32> {
    LEVEL_THRESHOLDS.get(usize::from(level) - 1).copied()
}

/// `(days - floor) / (ceiling - floor) * 100`, pinned to 100 at the top level.
pub fn progress_pct(days: u32) -> f64 {
    let level = level_for(days);
    let Some(ceiling) = next_threshold(level) else {
        return 100.0;
    };
    let floor = floor_for(level);
    f64::from(days - floor) / f64::from(ceiling - floor) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        for (days, level) in [(0, 1), (29, 1), (30, 2), (59, 2), (60, 3), (89, 3), (90, 4), (500, 4)] {
            assert_eq!(level_for(days), level, "days = {days}");
        }
    }

    #[test]
    fn progress_within_level() {
        assert_eq!(progress_pct(0), 0.0);
        assert_eq!(progress_pct(15), 50.0);
        assert_eq!(progress_pct(30), 0.0);
        assert_eq!(progress_pct(45), 50.0);
        assert_eq!(progress_pct(75), 50.0);
    }

    #[test]
    fn top_level_is_full() {
        assert_eq!(progress_pct(90), 100.0);
        assert_eq!(progress_pct(1000), 100.0);
    }

    #[test]
    fn days_to_next_level() {
        assert_eq!(LevelInfo::from_days(0).days_to_next_level, Some(30));
        assert_eq!(LevelInfo::from_days(59).days_to_next_level, Some(1));
        let top = LevelInfo::from_days(90);
        assert!(top.is_max());
        assert_eq!(top.days_to_next_level, None);
    }
}
