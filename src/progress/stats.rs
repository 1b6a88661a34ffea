//! Dashboard snapshot

use super::learner::LearnerState;
use super::level::format_xp;
use super::streak::StreakState;

/// Everything the stats screen shows, copied out of the live state
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_xp: u64,
    pub xp_percentage_change: f64,
    pub level: u32,
    pub level_label: String,
    pub level_progress: f64,
    pub xp_for_next_level: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub streak_freezes: u32,
    pub streak_percentage_change: f64,
    pub time_spent_minutes: u64,
    pub time_spent_percentage_change: f64,
    pub lessons_completed: usize,
    pub lessons_total: usize,
    pub last_huzzlingo_score: Option<u32>,
}

impl Stats {
    pub fn collect(learner: &LearnerState, streak: &StreakState) -> Self {
        Self {
            total_xp: learner.total_xp,
            xp_percentage_change: learner.xp_percentage_change,
            level: learner.level,
            level_label: learner.skill_level_label.clone(),
            level_progress: learner.level_progress,
            xp_for_next_level: learner.xp_for_next_level,
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            streak_freezes: streak.streak_freeze_count,
            streak_percentage_change: streak.percentage_change,
            time_spent_minutes: learner.time_spent_minutes,
            time_spent_percentage_change: learner.time_spent_percentage_change,
            lessons_completed: learner.lessons.iter().filter(|l| l.completed).count(),
            lessons_total: learner.lessons.len(),
            last_huzzlingo_score: learner.last_huzzlingo_score,
        }
    }

    pub fn formatted_xp(&self) -> String {
        format_xp(self.total_xp)
    }

    pub fn formatted_time(&self) -> String {
        format_time_spent(self.time_spent_minutes)
    }
}

/// `45m`, `1h 5m`, `2h`
pub fn format_time_spent(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// `+12.5%` / `-3.0%`
pub fn format_change(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}
