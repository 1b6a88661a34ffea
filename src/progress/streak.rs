//! Daily practice streak
//!
//! One practice event counts per calendar day. A freeze token bridges a gap
//! of missed days; without one the streak restarts at 1.

use crate::core::calendar::yesterday_of;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_practice_date: Option<NaiveDate>,
    pub streak_freeze_count: u32,
    /// Change in `current_streak` caused by the last practice event
    pub percentage_change: f64,
}

/// What a practice event did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Already practiced today (or the clock went backwards)
    Unchanged,
    Started,
    Extended,
    /// A freeze token covered the gap
    Frozen,
    Reset,
}

impl StreakState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed practice on `today`
    pub fn complete_practice(&mut self, today: NaiveDate) -> StreakChange {
        let old = self.current_streak;

        let change = match self.last_practice_date {
            Some(last) if last >= today => return StreakChange::Unchanged,
            None => {
                self.current_streak = 1;
                StreakChange::Started
            }
            Some(last) if last == yesterday_of(today) => {
                self.current_streak += 1;
                StreakChange::Extended
            }
            Some(_) if self.streak_freeze_count > 0 => {
                self.streak_freeze_count -= 1;
                self.current_streak += 1;
                StreakChange::Frozen
            }
            Some(_) => {
                self.current_streak = 1;
                StreakChange::Reset
            }
        };

        self.last_practice_date = Some(today);
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.percentage_change = if old > 0 {
            (self.current_streak as f64 - old as f64) / old as f64 * 100.0
        } else {
            100.0
        };

        tracing::info!(
            "Streak {:?}: {} -> {} (longest {}, freezes {})",
            change,
            old,
            self.current_streak,
            self.longest_streak,
            self.streak_freeze_count
        );
        change
    }

    /// Drop the current streak; longest and freezes are kept
    pub fn reset(&mut self) {
        self.current_streak = 0;
        self.last_practice_date = None;
        self.percentage_change = 0.0;
    }

    /// Spend a freeze token; false when none are left
    pub fn use_freeze(&mut self) -> bool {
        if self.streak_freeze_count == 0 {
            return false;
        }
        self.streak_freeze_count -= 1;
        true
    }

    pub fn add_freeze(&mut self) {
        self.streak_freeze_count += 1;
    }

    pub fn practiced_on(&self, day: NaiveDate) -> bool {
        self.last_practice_date == Some(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_first_practice_starts_streak() {
        let mut streak = StreakState::new();
        assert_eq!(streak.complete_practice(day(1)), StreakChange::Started);
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.percentage_change, 100.0);
        assert!(streak.practiced_on(day(1)));
    }

    #[test]
    fn test_same_day_is_noop() {
        let mut streak = StreakState::new();
        streak.complete_practice(day(1));
        let before = streak.clone();
        assert_eq!(streak.complete_practice(day(1)), StreakChange::Unchanged);
        assert_eq!(streak, before);
    }

    #[test]
    fn test_consecutive_days_extend() {
        let mut streak = StreakState::new();
        streak.complete_practice(day(1));
        streak.complete_practice(day(2));
        assert_eq!(streak.complete_practice(day(3)), StreakChange::Extended);
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.percentage_change, 50.0);
    }

    #[test]
    fn test_gap_with_freeze_continues() {
        let mut streak = StreakState::new();
        streak.add_freeze();
        streak.complete_practice(day(1));
        streak.complete_practice(day(2));
        assert_eq!(streak.complete_practice(day(4)), StreakChange::Frozen);
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.streak_freeze_count, 0);
    }

    #[test]
    fn test_gap_without_freeze_resets() {
        let mut streak = StreakState::new();
        streak.complete_practice(day(1));
        streak.complete_practice(day(2));
        assert_eq!(streak.complete_practice(day(5)), StreakChange::Reset);
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 2);
        assert_eq!(streak.percentage_change, -50.0);
    }

    #[test]
    fn test_date_in_past_ignored() {
        let mut streak = StreakState::new();
        streak.complete_practice(day(10));
        assert_eq!(streak.complete_practice(day(9)), StreakChange::Unchanged);
        assert_eq!(streak.last_practice_date, Some(day(10)));
    }

    #[test]
    fn test_use_freeze() {
        let mut streak = StreakState::new();
        assert!(!streak.use_freeze());
        streak.add_freeze();
        streak.add_freeze();
        assert!(streak.use_freeze());
        assert_eq!(streak.streak_freeze_count, 1);
    }

    #[test]
    fn test_reset_keeps_longest() {
        let mut streak = StreakState::new();
        streak.complete_practice(day(1));
        streak.complete_practice(day(2));
        streak.reset();
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 2);
        assert_eq!(streak.complete_practice(day(9)), StreakChange::Started);
    }
}
