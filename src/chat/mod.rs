//! The conversation challenge ("final boss")
//!
//! The learner gets a fixed budget of messages to hold the partner's
//! interest. Each message is scored by a fixed pattern battery; replies come
//! from the rule-based responder or an external generator. When the budget
//! runs out the composite score is the result of the playthrough.

pub mod closing;
pub mod credits;
pub mod responder;
pub mod scoring;
pub mod session;

pub use closing::{closing_line, WELCOME_MESSAGE};
pub use credits::CreditLedger;
pub use responder::{RuleResponder, Stage};
pub use scoring::{composite_score, score_message, MessageAnalysis, Tone};
pub use session::{
    ChatMessage, ConversationOutcome, ConversationSession, PendingTurn, Sender, TurnResult,
};
