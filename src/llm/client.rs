//! HTTP client for hosted chat-completion models
//!
//! Two wire formats are spoken: Anthropic's messages API and the
//! OpenAI-compatible chat completions API used by most other providers.
//! The format follows from the endpoint URL. Partner replies are one or two
//! sentences, so every request asks for a small completion.

use crate::core::error::{HuzzError, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Output cap for a single partner reply
const REPLY_MAX_TOKENS: u32 = 150;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Wire format of the configured endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

impl ApiFormat {
    pub fn for_url(url: &str) -> Self {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAI
        }
    }

    fn request_body(self, model: &str, system: &str, user: &str) -> Value {
        match self {
            ApiFormat::Anthropic => json!({
                "model": model,
                "max_tokens": REPLY_MAX_TOKENS,
                "system": system,
                "messages": [Turn::user(user)],
            }),
            ApiFormat::OpenAI => json!({
                "model": model,
                "max_tokens": REPLY_MAX_TOKENS,
                "messages": [Turn::system(system), Turn::user(user)],
            }),
        }
    }

    fn authorize(self, request: RequestBuilder, api_key: &str) -> RequestBuilder {
        match self {
            ApiFormat::Anthropic => request
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
            ApiFormat::OpenAI => request.bearer_auth(api_key),
        }
    }
}

/// Chat-completion client for one endpoint and model
pub struct LlmClient {
    http: Client,
    api_key: String,
    api_url: String,
    model: String,
    format: ApiFormat,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            format: ApiFormat::for_url(&api_url),
            api_key,
            api_url,
            model,
        }
    }

    /// Configure from `LLM_API_KEY` (required), `LLM_API_URL` and `LLM_MODEL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| HuzzError::LlmError("LLM_API_KEY not set".into()))?;
        let api_url = std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self::new(api_key, api_url, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_format(&self) -> ApiFormat {
        self.format
    }

    /// Ask for a completion of `user` under the `system` persona and return
    /// the raw text of the first choice
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = self.format.request_body(&self.model, system, user);
        let request = self.http.post(&self.api_url).json(&body);
        let request = self.format.authorize(request, &self.api_key);

        let text = match self.format {
            ApiFormat::Anthropic => send::<AnthropicReply>(request).await?.into_text(),
            ApiFormat::OpenAI => send::<OpenAIReply>(request).await?.into_text(),
        };
        text.ok_or_else(|| HuzzError::LlmError("Empty response".into()))
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| HuzzError::LlmError(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(HuzzError::LlmError(format!("API error {}: {}", status, detail)));
    }

    response
        .json()
        .await
        .map_err(|e| HuzzError::LlmError(e.to_string()))
}

#[derive(Debug, Serialize)]
struct Turn<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> Turn<'a> {
    fn system(content: &'a str) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicReply {
    content: Vec<TextBlock>,
}

#[derive(Debug, Deserialize)]
struct TextBlock {
    text: String,
}

impl AnthropicReply {
    fn into_text(self) -> Option<String> {
        self.content.into_iter().next().map(|block| block.text)
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIReply {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: String,
}

impl OpenAIReply {
    fn into_text(self) -> Option<String> {
        self.choices.into_iter().next().map(|choice| choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_follows_url() {
        assert_eq!(
            ApiFormat::for_url("https://api.anthropic.com/v1/messages"),
            ApiFormat::Anthropic
        );
        assert_eq!(
            ApiFormat::for_url("https://api.example.com/v1/chat/completions"),
            ApiFormat::OpenAI
        );

        let client = LlmClient::new("k".into(), DEFAULT_API_URL.into(), "test-model".into());
        assert_eq!(client.api_format(), ApiFormat::Anthropic);
        assert_eq!(client.model(), "test-model");
    }

    #[test]
    fn test_request_bodies() {
        let body = ApiFormat::Anthropic.request_body("m", "persona", "Person: hi\nSarah:");
        assert_eq!(body["max_tokens"], 150);
        assert_eq!(body["system"], "persona");
        assert_eq!(body["messages"][0]["role"], "user");

        let body = ApiFormat::OpenAI.request_body("m", "persona", "Person: hi\nSarah:");
        assert!(body.get("system").is_none());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Person: hi\nSarah:");
    }

    #[test]
    fn test_reply_shapes() {
        let openai: OpenAIReply = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Sarah: Hi!"}}]}"#,
        )
        .unwrap();
        assert_eq!(openai.into_text().as_deref(), Some("Sarah: Hi!"));

        let anthropic: AnthropicReply =
            serde_json::from_str(r#"{"content":[{"type":"text","text":"Hey there"}]}"#).unwrap();
        assert_eq!(anthropic.into_text().as_deref(), Some("Hey there"));

        let empty: OpenAIReply = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(empty.into_text().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let client = LlmClient::new(
            "test-key".into(),
            "http://127.0.0.1:9/v1/chat/completions".into(),
            "test-model".into(),
        );
        let result = client.complete("system", "user").await;
        assert!(matches!(result, Err(HuzzError::LlmError(_))));
    }
}
