//! Learner progress: lessons, XP and level, streak, time spent
//!
//! These are plain state objects with no I/O. The game context owns one of
//! each and persists them after every mutation.

pub mod learner;
pub mod lesson_progress;
pub mod level;
pub mod stats;
pub mod streak;
pub mod time_tracking;

pub use learner::{LearnerState, LessonRecord, XpAward};
pub use lesson_progress::{LessonProgress, LessonStatus, LessonSummary, UserLessonState};
pub use level::{level_for, LevelInfo};
pub use stats::Stats;
pub use streak::{StreakChange, StreakState};
pub use time_tracking::TimeTracker;

use crate::catalog::{LessonCatalog, LessonDefinition};

/// Result of looking for the next lesson to play
#[derive(Debug, Clone, Copy)]
pub enum NextLesson<'a> {
    Available(&'a LessonDefinition),
    /// Every lesson has been completed
    AllComplete,
    /// Lessons remain but their prerequisites are not met
    Blocked,
}

/// First lesson not yet completed whose prerequisites all are
pub fn next_available_lesson<'a>(
    catalog: &'a LessonCatalog,
    lessons: &UserLessonState,
) -> NextLesson<'a> {
    let mut remaining = catalog.iter().filter(|l| !lessons.is_completed(&l.id)).peekable();
    if remaining.peek().is_none() {
        return NextLesson::AllComplete;
    }
    remaining
        .find(|l| l.prerequisites.iter().all(|p| lessons.is_completed(p)))
        .map(NextLesson::Available)
        .unwrap_or(NextLesson::Blocked)
}
