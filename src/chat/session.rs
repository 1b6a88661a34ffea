//! One playthrough of the conversation challenge
//!
//! A turn is split in two so the reply can come from an async source:
//! [`ConversationSession::begin_turn`] validates and scores the learner's
//! message, [`ConversationSession::complete_turn`] appends the reply and
//! applies the score. Nothing here is persisted.

use super::closing::{closing_line, WELCOME_MESSAGE};
use super::responder::RuleResponder;
use super::scoring::{composite_score, score_message, MessageAnalysis};
use crate::core::config::ChatConfig;
use crate::core::error::{HuzzError, Result};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Boss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
        }
    }
}

/// Final result once the message budget is spent
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationOutcome {
    pub composite_score: u32,
    pub final_interest: u32,
    pub final_smoothness: u32,
    pub closing_line: String,
}

/// A scored learner message waiting for its reply
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub message: String,
    /// Interest before this message was scored
    pub interest: u32,
    /// Budget before this message was counted
    pub messages_left: u32,
    pub analysis: MessageAnalysis,
    /// History including this message
    pub history: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TurnResult {
    pub reply: String,
    pub analysis: MessageAnalysis,
    pub outcome: Option<ConversationOutcome>,
}

#[derive(Debug, Clone)]
pub struct ConversationSession {
    budget: u32,
    initial_interest: u32,
    initial_smoothness: u32,
    messages: Vec<ChatMessage>,
    messages_left: u32,
    interest: u32,
    smoothness: u32,
    /// Alternating learner / partner texts, learner first
    history: Vec<String>,
    outcome: Option<ConversationOutcome>,
}

impl ConversationSession {
    pub fn new(config: &ChatConfig) -> Self {
        let mut session = Self {
            budget: config.message_budget,
            initial_interest: config.initial_interest as u32,
            initial_smoothness: config.initial_smoothness as u32,
            messages: Vec::new(),
            messages_left: 0,
            interest: 0,
            smoothness: 0,
            history: Vec::new(),
            outcome: None,
        };
        session.reset();
        session
    }

    /// Start over with the welcome message and a full budget
    pub fn reset(&mut self) {
        self.messages = vec![ChatMessage::new(Sender::Boss, WELCOME_MESSAGE)];
        self.messages_left = self.budget;
        self.interest = self.initial_interest;
        self.smoothness = self.initial_smoothness;
        self.history.clear();
        self.outcome = None;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn messages_left(&self) -> u32 {
        self.messages_left
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn interest(&self) -> u32 {
        self.interest
    }

    pub fn smoothness(&self) -> u32 {
        self.smoothness
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn outcome(&self) -> Option<&ConversationOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Accept and score a learner message
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn> {
        if text.trim().is_empty() {
            return Err(HuzzError::EmptyMessage);
        }
        if self.messages_left == 0 || self.is_finished() {
            return Err(HuzzError::ConversationOver);
        }

        let messages_left = self.messages_left;
        let analysis = score_message(text, self.interest, self.smoothness, messages_left);

        self.messages.push(ChatMessage::new(Sender::User, text));
        self.messages_left -= 1;
        self.history.push(text.to_string());

        Ok(PendingTurn {
            message: text.to_string(),
            interest: self.interest,
            messages_left,
            analysis,
            history: self.history.clone(),
        })
    }

    /// Append the reply, apply the score and finish if the budget is spent
    pub fn complete_turn(&mut self, turn: PendingTurn, reply: String) -> TurnResult {
        self.messages.push(ChatMessage::new(Sender::Boss, reply.clone()));
        self.history.push(reply.clone());
        self.interest = turn.analysis.interest;
        self.smoothness = turn.analysis.smoothness;

        let outcome = if self.messages_left == 0 {
            Some(self.finish())
        } else {
            None
        };

        TurnResult {
            reply,
            analysis: turn.analysis,
            outcome,
        }
    }

    /// Full turn with a rule-based reply
    pub fn send(&mut self, text: &str, responder: &mut RuleResponder) -> Result<TurnResult> {
        let turn = self.begin_turn(text)?;
        let reply = responder.reply(
            &turn.message,
            turn.interest,
            turn.messages_left,
            turn.analysis.should_offer_closing,
        );
        Ok(self.complete_turn(turn, reply))
    }

    fn finish(&mut self) -> ConversationOutcome {
        let line = closing_line(self.interest);
        self.messages.push(ChatMessage::new(Sender::Boss, line));

        let outcome = ConversationOutcome {
            composite_score: composite_score(self.interest, self.smoothness),
            final_interest: self.interest,
            final_smoothness: self.smoothness,
            closing_line: line.to_string(),
        };
        tracing::info!(
            "Conversation finished: score {} (interest {}, smoothness {})",
            outcome.composite_score,
            outcome.final_interest,
            outcome.final_smoothness
        );
        self.outcome = Some(outcome.clone());
        outcome
    }
}
