//! External reply generation
//!
//! An optional collaborator that asks a hosted model for the partner's
//! reply. The conversation never depends on it: any error is reported to
//! the caller, which falls back to the rule-based responder.

pub mod client;
pub mod persona;
pub mod postprocess;

pub use client::{ApiFormat, LlmClient};

use crate::core::error::Result;
use async_trait::async_trait;

/// Everything a generator sees for one turn
#[derive(Debug, Clone)]
pub struct ReplyRequest<'a> {
    pub message: &'a str,
    /// Alternating learner / partner texts, ending with `message`
    pub history: &'a [String],
    pub interest: u32,
    pub messages_left: u32,
    pub budget: u32,
}

impl ReplyRequest<'_> {
    /// Transcript prompt; also used to strip echoes from the output
    pub fn conversation_prompt(&self) -> String {
        persona::conversation_prompt(self.message, self.history)
    }
}

/// Source of raw partner replies
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Raw model output for this turn, before post-processing
    async fn generate(&self, request: &ReplyRequest<'_>) -> Result<String>;
}

/// Reply generator backed by an HTTP chat-completion API
pub struct HttpReplyGenerator {
    client: LlmClient,
}

impl HttpReplyGenerator {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Build from `LLM_API_KEY` / `LLM_API_URL` / `LLM_MODEL`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LlmClient::from_env()?))
    }
}

#[async_trait]
impl ReplyGenerator for HttpReplyGenerator {
    async fn generate(&self, request: &ReplyRequest<'_>) -> Result<String> {
        let system = persona::system_prompt(request.interest, request.messages_left, request.budget);
        let user = request.conversation_prompt();
        tracing::debug!("Requesting reply from {}", self.client.model());
        self.client.complete(&system, &user).await
    }
}
