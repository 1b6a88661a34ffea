//! Playing through one lesson
//!
//! A [`LessonRun`] is a cursor over the lesson's questions. It holds no
//! progress of its own: answers go straight into the game's lesson record,
//! and the run only counts how many it has seen to know when to finish.

use super::Game;
use crate::catalog::{Answer, Question};
use crate::core::calendar::Clock;
use crate::core::error::{HuzzError, Result};
use crate::core::types::LessonId;
use crate::progress::lesson_progress::score_percent;
use crate::progress::StreakChange;
use crate::storage::Store;

/// Cursor over a lesson being played
#[derive(Debug, Clone)]
pub struct LessonRun {
    lesson_id: LessonId,
    index: usize,
    total: usize,
    correct: usize,
}

/// What the learner sees after answering
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub explanation: String,
    /// Set once the last question has been answered
    pub finished: Option<CompletionReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub score: u32,
    pub correct: usize,
    pub total: usize,
    pub xp_gained: u64,
    pub level_before: u32,
    pub level_after: u32,
    pub streak: u32,
    pub streak_change: StreakChange,
}

impl CompletionReport {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

impl LessonRun {
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    /// Zero-based position of the question on screen
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.total
    }
}

impl<S: Store, C: Clock> Game<S, C> {
    /// Begin playing a lesson from its first question
    pub fn start_lesson(&mut self, lesson_id: &LessonId) -> Result<LessonRun> {
        let total = self.catalog.require(lesson_id)?.question_count();
        self.set_current_lesson(lesson_id)?;
        tracing::debug!("Starting lesson {} ({} questions)", lesson_id, total);
        Ok(LessonRun {
            lesson_id: lesson_id.clone(),
            index: 0,
            total,
            correct: 0,
        })
    }

    /// The question the run is waiting on
    pub fn current_question(&self, run: &LessonRun) -> Option<&Question> {
        self.catalog
            .get(&run.lesson_id)
            .and_then(|lesson| lesson.questions.get(run.index))
    }

    /// Check and record an answer to the current question.
    ///
    /// Answering the last question completes the lesson: XP is awarded on
    /// the run's score and today's practice counts toward the streak.
    pub fn submit_answer(&mut self, run: &mut LessonRun, answer: &Answer) -> Result<AnswerFeedback> {
        let (question_id, explanation) = {
            let question = self
                .current_question(run)
                .ok_or_else(|| HuzzError::LessonFinished(run.lesson_id.clone()))?;
            (question.id().clone(), question.explanation().to_string())
        };

        let is_correct = self.answer_question(&run.lesson_id, &question_id, answer)?;
        if is_correct {
            run.correct += 1;
        }
        run.index += 1;

        let finished = if run.is_finished() {
            Some(self.finish_run(run)?)
        } else {
            None
        };

        Ok(AnswerFeedback {
            is_correct,
            explanation,
            finished,
        })
    }

    fn finish_run(&mut self, run: &LessonRun) -> Result<CompletionReport> {
        let score = score_percent(run.correct, run.total);
        let award = self.complete_lesson(&run.lesson_id, score)?;
        let streak_change = self.complete_practice();

        Ok(CompletionReport {
            score,
            correct: run.correct,
            total: run.total,
            xp_gained: award.xp_gained,
            level_before: award.level_before,
            level_after: award.level_after,
            streak: self.streak.current_streak,
            streak_change,
        })
    }
}
