//! Chat-completions backed extractor
//!
//! Sends the free text to `/v1/chat/completions` in JSON mode with a system
//! prompt describing the four quadrants, then validates the returned message
//! content with [`parse_task_list`](super::parse_task_list).

use super::{ExtractError, ExtractedTask, TaskExtractor, parse_task_list};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const SYSTEM_PROMPT: &str = r#"Extract tasks from the given text and return them in JSON format. For each task, determine its quadrant based on these rules:
- important-urgent: Critical tasks that need immediate attention
- important-not-urgent: Important tasks that can be scheduled
- not-important-urgent: Tasks that feel urgent but aren't important
- not-important-not-urgent: Tasks that can be eliminated or delegated

If the quadrant isn't clear default to important-urgent.

Return format:
{
  "tasks": [
    { "title": "task description", "quadrant": "quadrant-name" }
  ]
}"#;

/// Configuration for [`OpenAiExtractor`]
#[derive(Debug, Clone)]
pub struct OpenAiExtractorConfig {
    pub api_key: String,
    /// Defaults to `https://api.openai.com`
    pub base_url: String,
    pub model: String,
}

impl OpenAiExtractorConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com".into(),
            model: model.into(),
        }
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Extractor that delegates to an OpenAI-compatible chat-completions endpoint
pub struct OpenAiExtractor {
    config: OpenAiExtractorConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiExtractor")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

#[derive(Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiExtractor {
    pub fn new(config: OpenAiExtractorConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(&self, text: &str) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": text },
            ],
        })
    }
}

/// Pull `error.message` out of an OpenAI error body, falling back to the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl TaskExtractor for OpenAiExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedTask>, ExtractError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        debug!(model = %self.config.model, chars = text.len(), "requesting task extraction");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| ExtractError::Service(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Service(format!(
                "OpenAI HTTP {}: {}",
                status.as_u16(),
                error_message(&body)
            )));
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|e| ExtractError::InvalidPayload(format!("unreadable completion: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ExtractError::InvalidPayload("completion has no content".to_string()))?;

        parse_task_list(&content)
    }
}
