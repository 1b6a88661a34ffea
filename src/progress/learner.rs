//! Learner-wide XP, level and activity record

use super::level::{level_for, LevelInfo};
use crate::catalog::{LessonCatalog, LessonDefinition};
use crate::core::types::{percentage_change, LessonId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog mirror kept on the learner record for dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub score: u32,
}

impl LessonRecord {
    fn fresh(lesson: &LessonDefinition) -> Self {
        Self {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            completed: false,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerState {
    pub lessons: Vec<LessonRecord>,
    pub current_lesson_id: Option<LessonId>,
    pub total_xp: u64,
    pub xp_percentage_change: f64,
    pub time_spent_minutes: u64,
    pub time_spent_percentage_change: f64,
    pub level: u32,
    pub skill_level_label: String,
    pub level_progress: f64,
    pub xp_for_next_level: u64,
    pub last_activity_time: Option<DateTime<Utc>>,
    pub last_huzzlingo_score: Option<u32>,
    pub last_huzzlingo_date: Option<DateTime<Utc>>,
}

/// Outcome of crediting a finished lesson
#[derive(Debug, Clone, PartialEq)]
pub struct XpAward {
    pub xp_gained: u64,
    pub level_before: u32,
    pub level_after: u32,
}

impl XpAward {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

impl LearnerState {
    /// Zero state mirroring `catalog`
    pub fn new(catalog: &LessonCatalog) -> Self {
        let info = level_for(0);
        Self {
            lessons: catalog.iter().map(LessonRecord::fresh).collect(),
            current_lesson_id: catalog.first().map(|l| l.id.clone()),
            total_xp: 0,
            xp_percentage_change: 0.0,
            time_spent_minutes: 0,
            time_spent_percentage_change: 0.0,
            level: info.level,
            skill_level_label: info.label,
            level_progress: info.progress,
            xp_for_next_level: info.xp_to_next,
            last_activity_time: None,
            last_huzzlingo_score: None,
            last_huzzlingo_date: None,
        }
    }

    pub fn level_info(&self) -> LevelInfo {
        level_for(self.total_xp)
    }

    fn refresh_level_cache(&mut self) {
        let info = level_for(self.total_xp);
        self.level = info.level;
        self.skill_level_label = info.label;
        self.level_progress = info.progress;
        self.xp_for_next_level = info.xp_to_next;
    }

    pub fn set_current_lesson(&mut self, lesson_id: LessonId, now: DateTime<Utc>) {
        self.current_lesson_id = Some(lesson_id);
        self.last_activity_time = Some(now);
    }

    /// Credit XP for a finished lesson scored at `score_percent`
    pub fn complete_lesson(
        &mut self,
        lesson: &LessonDefinition,
        score_percent: u32,
        now: DateTime<Utc>,
    ) -> XpAward {
        let score_percent = score_percent.min(100);
        let old_xp = self.total_xp;
        let level_before = self.level_info().level;

        let record = match self.lessons.iter().position(|l| l.id == lesson.id) {
            Some(idx) => &mut self.lessons[idx],
            None => {
                self.lessons.push(LessonRecord::fresh(lesson));
                let last = self.lessons.len() - 1;
                &mut self.lessons[last]
            }
        };
        record.completed = true;
        record.score = score_percent;

        let xp_gained =
            (lesson.metadata.xp_reward as f64 * score_percent as f64 / 100.0).round() as u64;
        self.total_xp += xp_gained;
        self.xp_percentage_change = percentage_change(old_xp as f64, self.total_xp as f64);
        self.refresh_level_cache();
        self.last_activity_time = Some(now);

        tracing::info!(
            "Lesson {} completed at {}%: +{} XP ({} -> {}), level {}",
            lesson.id,
            score_percent,
            xp_gained,
            old_xp,
            self.total_xp,
            self.level
        );

        XpAward {
            xp_gained,
            level_before,
            level_after: self.level,
        }
    }

    pub fn add_time_spent(&mut self, minutes: u64, now: DateTime<Utc>) {
        let old = self.time_spent_minutes;
        self.time_spent_minutes += minutes;
        self.time_spent_percentage_change = if old > 0 {
            (self.time_spent_minutes - old) as f64 / old as f64 * 100.0
        } else {
            0.0
        };
        self.last_activity_time = Some(now);
    }

    pub fn record_huzzlingo_score(&mut self, score: u32, now: DateTime<Utc>) {
        self.last_huzzlingo_score = Some(score);
        self.last_huzzlingo_date = Some(now);
    }

    /// Wipe XP back to zero, keeping time spent and the chat score
    pub fn reset_xp(&mut self, catalog: &LessonCatalog) {
        self.total_xp = 0;
        self.xp_percentage_change = 0.0;
        self.lessons = catalog.iter().map(LessonRecord::fresh).collect();
        self.refresh_level_cache();
    }

    /// Rebuild a learner record from its stored JSON.
    ///
    /// Records written before lesson ids were strings like `lesson_001` get
    /// their lesson list rebuilt from the catalog; totals are carried over.
    /// The level cache is always recomputed from `total_xp`. Returns `None`
    /// if the document is not a learner record at all.
    pub fn from_stored(value: Value, catalog: &LessonCatalog) -> Option<Self> {
        if !value.is_object() {
            return None;
        }

        if has_legacy_lesson_ids(&value) {
            tracing::info!("Migrating learner record with legacy lesson ids");
            let mut state = Self::new(catalog);
            state.total_xp = value.get("total_xp").and_then(Value::as_u64).unwrap_or(0);
            state.xp_percentage_change = f64_field(&value, "xp_percentage_change");
            state.time_spent_minutes = value
                .get("time_spent_minutes")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            state.time_spent_percentage_change =
                f64_field(&value, "time_spent_percentage_change");
            state.last_activity_time = value
                .get("last_activity_time")
                .and_then(|v| serde_json::from_value(v.clone()).ok());
            state.last_huzzlingo_score = value
                .get("last_huzzlingo_score")
                .and_then(Value::as_u64)
                .map(|s| s as u32);
            state.last_huzzlingo_date = value
                .get("last_huzzlingo_date")
                .and_then(|v| serde_json::from_value(v.clone()).ok());
            state.refresh_level_cache();
            return Some(state);
        }

        let mut state: LearnerState = match serde_json::from_value(value) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Unreadable learner record, starting fresh: {}", e);
                return None;
            }
        };
        if state.lessons.is_empty() {
            state.lessons = catalog.iter().map(LessonRecord::fresh).collect();
        }
        state.refresh_level_cache();
        Some(state)
    }
}

fn f64_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Numeric ids, either as JSON numbers or digit-only strings
fn has_legacy_lesson_ids(value: &Value) -> bool {
    value
        .get("lessons")
        .and_then(Value::as_array)
        .map(|lessons| {
            lessons.iter().any(|lesson| match lesson.get("id") {
                Some(Value::Number(_)) => true,
                Some(Value::String(id)) => LessonId::new(id.as_str()).is_legacy_numeric(),
                _ => false,
            })
        })
        .unwrap_or(false)
}
