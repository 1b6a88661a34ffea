//! Per-lesson question attempt tracking
//!
//! One [`LessonProgress`] per lesson the learner has touched. Every answer
//! overwrites the previous record for that question, so the score always
//! reflects the most recent attempt at each question.

use crate::catalog::LessonDefinition;
use crate::core::error::{HuzzError, Result};
use crate::core::types::{LessonId, QuestionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle of a single lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonStatus {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionProgress {
    pub attempted: bool,
    pub is_correct: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    /// First unattempted question in lesson order, or `total_questions`
    pub current_question_index: usize,
    pub total_questions: usize,
    pub completed: bool,
    /// round(correct / total * 100)
    pub score: u32,
    pub last_attempt: Option<DateTime<Utc>>,
    pub question_progress: BTreeMap<QuestionId, QuestionProgress>,
    pub correct_answers: usize,
    /// Distinct questions with a record
    pub total_attempts: usize,
}

impl LessonProgress {
    pub fn new(total_questions: usize) -> Self {
        Self {
            current_question_index: 0,
            total_questions,
            completed: false,
            score: 0,
            last_attempt: None,
            question_progress: BTreeMap::new(),
            correct_answers: 0,
            total_attempts: 0,
        }
    }

    pub fn status(&self) -> LessonStatus {
        if self.completed {
            LessonStatus::Completed
        } else if self.question_progress.is_empty() {
            LessonStatus::NotStarted
        } else {
            LessonStatus::InProgress
        }
    }

    /// Overwrite the record for one question and recompute derived fields
    fn record(
        &mut self,
        lesson: &LessonDefinition,
        question_id: &QuestionId,
        is_correct: bool,
        now: DateTime<Utc>,
    ) {
        self.question_progress.insert(
            question_id.clone(),
            QuestionProgress {
                attempted: true,
                is_correct,
                timestamp: Some(now),
            },
        );
        self.total_questions = lesson.question_count();
        self.last_attempt = Some(now);
        self.recompute(lesson);
    }

    fn recompute(&mut self, lesson: &LessonDefinition) {
        self.correct_answers = self
            .question_progress
            .values()
            .filter(|p| p.is_correct)
            .count();
        self.total_attempts = self.question_progress.len();
        self.score = score_percent(self.correct_answers, self.total_questions);

        let attempted = |id: &QuestionId| {
            self.question_progress
                .get(id)
                .map(|p| p.attempted)
                .unwrap_or(false)
        };
        self.current_question_index = lesson
            .questions
            .iter()
            .position(|q| !attempted(q.id()))
            .unwrap_or(self.total_questions);
        self.completed = lesson.questions.iter().all(|q| attempted(q.id()));
    }
}

/// Integer percentage, rounded half away from zero
pub fn score_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Read-only view for progress bars and lesson cards
#[derive(Debug, Clone, PartialEq)]
pub struct LessonSummary {
    pub progress: u32,
    pub is_complete: bool,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub score: u32,
}

/// All per-lesson detail for the learner (the lesson-progress record)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserLessonState {
    pub lessons: BTreeMap<LessonId, LessonProgress>,
    pub last_active_lesson_id: Option<LessonId>,
    /// Append-only, in completion order
    pub completed_lessons: Vec<LessonId>,
}

impl UserLessonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer; the lesson must be the one `question_id` belongs to
    pub fn record_answer(
        &mut self,
        lesson: &LessonDefinition,
        question_id: &QuestionId,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<&LessonProgress> {
        if lesson.question(question_id).is_none() {
            return Err(HuzzError::QuestionNotFound {
                lesson: lesson.id.clone(),
                question: question_id.clone(),
            });
        }

        let progress = self
            .lessons
            .entry(lesson.id.clone())
            .or_insert_with(|| LessonProgress::new(lesson.question_count()));
        progress.record(lesson, question_id, is_correct, now);

        if progress.completed && !self.completed_lessons.contains(&lesson.id) {
            self.completed_lessons.push(lesson.id.clone());
        }
        self.last_active_lesson_id = Some(lesson.id.clone());

        Ok(&self.lessons[&lesson.id])
    }

    /// Clear per-question records so the lesson can be replayed
    pub fn reset_lesson(&mut self, lesson: &LessonDefinition) {
        self.lessons
            .insert(lesson.id.clone(), LessonProgress::new(lesson.question_count()));
    }

    pub fn progress(&self, lesson_id: &LessonId) -> Option<&LessonProgress> {
        self.lessons.get(lesson_id)
    }

    pub fn status(&self, lesson_id: &LessonId) -> LessonStatus {
        self.lessons
            .get(lesson_id)
            .map(LessonProgress::status)
            .unwrap_or(LessonStatus::NotStarted)
    }

    pub fn is_completed(&self, lesson_id: &LessonId) -> bool {
        self.completed_lessons.contains(lesson_id)
    }

    pub fn summary(&self, lesson: &LessonDefinition) -> LessonSummary {
        let total_questions = lesson.question_count();
        match self.lessons.get(&lesson.id) {
            Some(progress) => {
                let correct_answers = progress
                    .question_progress
                    .values()
                    .filter(|p| p.is_correct)
                    .count();
                let score = score_percent(correct_answers, total_questions);
                LessonSummary {
                    progress: score,
                    is_complete: progress.completed,
                    correct_answers,
                    total_questions,
                    score,
                }
            }
            None => LessonSummary {
                progress: 0,
                is_complete: false,
                correct_answers: 0,
                total_questions,
                score: 0,
            },
        }
    }
}
