//! Game context
//!
//! [`Game`] is the single owner of every state object (learner, streak,
//! per-lesson detail, chat credits, the live conversation) plus the store and
//! the clock. All mutations go through it, and each one is followed by a
//! write of the affected record.

pub mod lesson_run;

pub use lesson_run::{AnswerFeedback, CompletionReport, LessonRun};

use crate::catalog::{Answer, LessonCatalog, LessonDefinition};
use crate::chat::{ConversationSession, CreditLedger, PendingTurn, RuleResponder, TurnResult};
use crate::core::calendar::Clock;
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::{LessonId, QuestionId};
use crate::llm::{postprocess, ReplyGenerator, ReplyRequest};
use crate::progress::{
    next_available_lesson, LearnerState, LessonProgress, LessonStatus, LessonSummary, NextLesson,
    Stats, StreakChange, StreakState, TimeTracker, UserLessonState, XpAward,
};
use crate::storage::{self, keys, Store};
use chrono::{DateTime, Utc};
use std::time::Duration;

pub struct Game<S: Store, C: Clock> {
    config: GameConfig,
    catalog: LessonCatalog,
    store: S,
    clock: C,
    learner: LearnerState,
    streak: StreakState,
    lessons: UserLessonState,
    credits: CreditLedger,
    chat: ConversationSession,
    responder: RuleResponder,
    generator: Option<Box<dyn ReplyGenerator>>,
    time: TimeTracker,
}

impl<S: Store, C: Clock> Game<S, C> {
    /// Load every record from `store`, migrating and backfilling as needed
    pub fn new(config: GameConfig, catalog: LessonCatalog, store: S, clock: C) -> Self {
        let now = clock.now();

        let learner = store
            .load(keys::LEARNING)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(value) => LearnerState::from_stored(value, &catalog),
                Err(e) => {
                    tracing::warn!("Discarding unreadable record '{}': {}", keys::LEARNING, e);
                    None
                }
            })
            .unwrap_or_else(|| LearnerState::new(&catalog));
        let streak: StreakState = storage::load_or_default(&store, keys::STREAK);
        let lessons: UserLessonState = storage::load_or_default(&store, keys::LESSON_PROGRESS);

        let credits = match storage::load_json::<u32>(&store, keys::CREDITS) {
            Some(remaining) => CreditLedger::with_remaining(&config.credits, remaining),
            None => CreditLedger::new(&config.credits),
        };

        let last_active = storage::load_json::<DateTime<Utc>>(&store, keys::LAST_ACTIVE);

        let mut game = Self {
            chat: ConversationSession::new(&config.chat),
            responder: RuleResponder::new(config.chat.rng_seed, config.chat.message_budget),
            time: TimeTracker::new(config.time.tick_interval_secs, now),
            config,
            catalog,
            store,
            clock,
            learner,
            streak,
            lessons,
            credits,
            generator: None,
        };

        let away = TimeTracker::backfill_minutes(last_active, now);
        if away > 0 {
            tracing::info!("Backfilling {} minutes since last active", away);
            game.learner.add_time_spent(away, now);
        }
        game.save_learner();
        game.save_credits();
        game.touch_last_active();

        tracing::info!(
            "Loaded learner: {} XP, level {} ({}), streak {}",
            game.learner.total_xp,
            game.learner.level,
            game.learner.skill_level_label,
            game.streak.current_streak
        );
        game
    }

    /// Attach an external reply generator for the chat challenge
    pub fn with_reply_generator(mut self, generator: Box<dyn ReplyGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn set_reply_generator(&mut self, generator: Option<Box<dyn ReplyGenerator>>) {
        self.generator = generator;
    }

    pub fn has_reply_generator(&self) -> bool {
        self.generator.is_some()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &LessonCatalog {
        &self.catalog
    }

    pub fn learner(&self) -> &LearnerState {
        &self.learner
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn lessons(&self) -> &UserLessonState {
        &self.lessons
    }

    pub fn chat(&self) -> &ConversationSession {
        &self.chat
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn stats(&self) -> Stats {
        Stats::collect(&self.learner, &self.streak)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn save_learner(&mut self) {
        storage::save_json(&mut self.store, keys::LEARNING, &self.learner);
    }

    fn save_streak(&mut self) {
        storage::save_json(&mut self.store, keys::STREAK, &self.streak);
    }

    fn save_lessons(&mut self) {
        storage::save_json(&mut self.store, keys::LESSON_PROGRESS, &self.lessons);
    }

    fn save_credits(&mut self) {
        storage::save_json(&mut self.store, keys::CREDITS, &self.credits.remaining());
    }

    /// Write the last-active stamp used for the startup backfill
    pub fn touch_last_active(&mut self) {
        let now = self.clock.now();
        storage::save_json(&mut self.store, keys::LAST_ACTIVE, &now);
    }

    // ------------------------------------------------------------------
    // Lessons
    // ------------------------------------------------------------------

    fn lesson(&self, lesson_id: &LessonId) -> Result<&LessonDefinition> {
        self.catalog.require(lesson_id)
    }

    /// Record one answer; last write wins per question
    pub fn record_answer(
        &mut self,
        lesson_id: &LessonId,
        question_id: &QuestionId,
        is_correct: bool,
    ) -> Result<LessonProgress> {
        let now = self.clock.now();
        let lesson = self.catalog.require(lesson_id)?;
        let progress = self
            .lessons
            .record_answer(lesson, question_id, is_correct, now)?
            .clone();
        tracing::debug!(
            "Answer recorded for {}/{}: correct={}, score {}%",
            lesson_id,
            question_id,
            is_correct,
            progress.score
        );
        self.save_lessons();
        Ok(progress)
    }

    /// Check `answer` against the catalog and record it
    pub fn answer_question(
        &mut self,
        lesson_id: &LessonId,
        question_id: &QuestionId,
        answer: &Answer,
    ) -> Result<bool> {
        let lesson = self.lesson(lesson_id)?;
        let is_correct = lesson
            .question(question_id)
            .map(|q| q.is_correct(answer))
            .unwrap_or(false);
        self.record_answer(lesson_id, question_id, is_correct)?;
        Ok(is_correct)
    }

    /// Award XP for a finished lesson
    pub fn complete_lesson(&mut self, lesson_id: &LessonId, score_percent: u32) -> Result<XpAward> {
        let now = self.clock.now();
        let lesson = self.catalog.require(lesson_id)?;
        let award = self.learner.complete_lesson(lesson, score_percent, now);
        if award.leveled_up() {
            tracing::info!(
                "Level up: {} -> {} ({})",
                award.level_before,
                award.level_after,
                self.learner.skill_level_label
            );
        }
        self.save_learner();
        Ok(award)
    }

    /// Count today's practice toward the streak
    pub fn complete_practice(&mut self) -> StreakChange {
        let change = self.streak.complete_practice(self.clock.today());
        if change != StreakChange::Unchanged {
            self.save_streak();
        }
        change
    }

    pub fn next_available_lesson(&self) -> NextLesson<'_> {
        next_available_lesson(&self.catalog, &self.lessons)
    }

    /// Clear a lesson's answers so it can be replayed; XP is kept
    pub fn retry_lesson(&mut self, lesson_id: &LessonId) -> Result<()> {
        let lesson = self.catalog.require(lesson_id)?;
        self.lessons.reset_lesson(lesson);
        tracing::info!("Lesson {} reset for retry", lesson_id);
        self.save_lessons();
        Ok(())
    }

    pub fn lesson_status(&self, lesson_id: &LessonId) -> Result<LessonStatus> {
        self.lesson(lesson_id)?;
        Ok(self.lessons.status(lesson_id))
    }

    pub fn lesson_summary(&self, lesson_id: &LessonId) -> Result<LessonSummary> {
        let lesson = self.lesson(lesson_id)?;
        Ok(self.lessons.summary(lesson))
    }

    pub fn has_completed_all_lessons(&self) -> bool {
        self.catalog
            .iter()
            .all(|lesson| self.lessons.is_completed(&lesson.id))
    }

    pub fn set_current_lesson(&mut self, lesson_id: &LessonId) -> Result<()> {
        self.lesson(lesson_id)?;
        let now = self.clock.now();
        self.learner.set_current_lesson(lesson_id.clone(), now);
        self.save_learner();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Streak
    // ------------------------------------------------------------------

    pub fn add_streak_freeze(&mut self) {
        self.streak.add_freeze();
        self.save_streak();
    }

    pub fn use_streak_freeze(&mut self) -> bool {
        let used = self.streak.use_freeze();
        if used {
            self.save_streak();
        }
        used
    }

    pub fn reset_streak(&mut self) {
        self.streak.reset();
        self.save_streak();
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Credit any time ticks that are due; returns the minutes added
    pub fn tick(&mut self) -> u64 {
        let now = self.clock.now();
        let minutes = self.time.take_due_minutes(now);
        if minutes > 0 {
            self.learner.add_time_spent(minutes, now);
            self.save_learner();
        }
        self.touch_last_active();
        minutes
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    pub fn credits_left(&self) -> u32 {
        self.credits.remaining()
    }

    pub fn reset_credits(&mut self) {
        self.credits.reset();
        self.save_credits();
    }

    pub fn reset_chat(&mut self) {
        self.chat.reset();
    }

    /// Send a learner message and wait for the partner's reply.
    ///
    /// The external generator is tried first when configured and a credit
    /// can be spent; otherwise, or if it fails, the rule-based responder
    /// answers.
    pub async fn send_chat_message(&mut self, text: &str) -> Result<TurnResult> {
        let turn = self.chat.begin_turn(text)?;
        let reply = self.obtain_reply(&turn).await;

        if self.config.chat.typing_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.chat.typing_delay_ms)).await;
        }

        let result = self.chat.complete_turn(turn, reply);
        if let Some(outcome) = &result.outcome {
            let now = self.clock.now();
            self.learner
                .record_huzzlingo_score(outcome.composite_score, now);
            self.save_learner();
        }
        Ok(result)
    }

    async fn obtain_reply(&mut self, turn: &PendingTurn) -> String {
        if self.config.chat.external_replies {
            if let Some(generator) = self.generator.as_deref() {
                if self.credits.consume() {
                    storage::save_json(&mut self.store, keys::CREDITS, &self.credits.remaining());
                    let request = ReplyRequest {
                        message: &turn.message,
                        history: &turn.history,
                        interest: turn.interest,
                        messages_left: turn.messages_left,
                        budget: self.chat.budget(),
                    };
                    match generator.generate(&request).await {
                        Ok(raw) => {
                            let prompt = request.conversation_prompt();
                            return match postprocess::finish_reply(&raw, &prompt, turn.interest) {
                                Some(reply) => reply,
                                None => {
                                    tracing::debug!("Generated reply too short, using fallback");
                                    self.responder.fallback_reply(&turn.message, turn.interest)
                                }
                            };
                        }
                        Err(e) => {
                            tracing::warn!("Reply generator failed, using rule-based reply: {}", e);
                        }
                    }
                } else {
                    tracing::debug!("No credits left, using rule-based reply");
                }
            }
        }

        self.responder.reply(
            &turn.message,
            turn.interest,
            turn.messages_left,
            turn.analysis.should_offer_closing,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::FixedClock;
    use crate::storage::MemoryStore;

    fn game() -> Game<MemoryStore, FixedClock> {
        Game::new(
            GameConfig::default(),
            LessonCatalog::builtin(),
            MemoryStore::new(),
            FixedClock::at_date(2026, 6, 1),
        )
    }

    #[test]
    fn test_new_game_writes_initial_records() {
        let game = game();
        assert!(game.store().contains(keys::LEARNING));
        assert!(game.store().contains(keys::CREDITS));
        assert!(game.store().contains(keys::LAST_ACTIVE));
        assert_eq!(game.credits_left(), 1000);
        assert_eq!(game.learner().total_xp, 0);
    }

    #[test]
    fn test_unknown_lesson_is_an_error() {
        let mut game = game();
        let missing = LessonId::from("lesson_999");
        assert!(game
            .record_answer(&missing, &QuestionId::from("q1_001"), true)
            .is_err());
        assert!(game.complete_lesson(&missing, 100).is_err());
        assert!(game.retry_lesson(&missing).is_err());
        assert!(game.lesson_status(&missing).is_err());
    }

    #[test]
    fn test_record_answer_persists() {
        let mut game = game();
        let writes = game.store().write_count();
        game.record_answer(
            &LessonId::from("lesson_001"),
            &QuestionId::from("q1_001"),
            true,
        )
        .unwrap();
        assert_eq!(game.store().write_count(), writes + 1);
        assert!(game.store().contains(keys::LESSON_PROGRESS));
    }

    #[test]
    fn test_practice_once_per_day() {
        let mut game = game();
        assert_eq!(game.complete_practice(), StreakChange::Started);
        assert_eq!(game.complete_practice(), StreakChange::Unchanged);
        game.clock().advance_days(1);
        assert_eq!(game.complete_practice(), StreakChange::Extended);
        assert_eq!(game.streak().current_streak, 2);
    }

    #[test]
    fn test_ticks_credit_minutes() {
        let mut game = game();
        assert_eq!(game.tick(), 0);
        game.clock().advance_minutes(3);
        assert_eq!(game.tick(), 3);
        assert_eq!(game.learner().time_spent_minutes, 3);
    }

    #[test]
    fn test_all_lessons_completed() {
        let mut game = game();
        assert!(!game.has_completed_all_lessons());
        let ids: Vec<(LessonId, Vec<QuestionId>)> = game
            .catalog()
            .iter()
            .map(|l| (l.id.clone(), l.questions.iter().map(|q| q.id().clone()).collect()))
            .collect();
        for (lesson, questions) in ids {
            for q in questions {
                game.record_answer(&lesson, &q, true).unwrap();
            }
        }
        assert!(game.has_completed_all_lessons());
        assert!(matches!(game.next_available_lesson(), NextLesson::AllComplete));
    }
}
