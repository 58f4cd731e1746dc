//! Free-text task extraction
//!
//! Bulk add hands arbitrary text to a [`TaskExtractor`], which returns
//! candidate titles with an optional quadrant. Two implementations ship:
//! - [`OpenAiExtractor`]: asks a chat-completions model for a JSON task list
//! - [`RuleExtractor`]: deterministic keyword-based splitter, used offline and in tests
//!
//! Extraction has its own error surface, separate from transport errors of
//! the task API. A payload that does not conform to the task-list shape is a
//! hard failure for the whole call; nothing is partially accepted.

mod openai;
mod rules;

pub use openai::{OpenAiExtractor, OpenAiExtractorConfig};
pub use rules::RuleExtractor;

use crate::task::Quadrant;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One task candidate produced by an extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<Quadrant>,
}

impl ExtractedTask {
    pub fn new(title: impl Into<String>, quadrant: Option<Quadrant>) -> Self {
        Self {
            title: title.into(),
            quadrant,
        }
    }

    /// Quadrant to persist: the extracted one, or the default when omitted
    pub fn quadrant_or_default(&self) -> Quadrant {
        self.quadrant.unwrap_or_default()
    }
}

/// Errors raised by a text-extraction collaborator
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The extraction service could not be reached or answered with an error status
    #[error("extraction service request failed: {0}")]
    Service(String),

    /// The service answered, but the payload is not a conforming task list
    #[error("extraction returned a non-conforming payload: {0}")]
    InvalidPayload(String),
}

/// Capability that turns free text into task candidates
#[async_trait]
pub trait TaskExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedTask>, ExtractError>;
}

#[derive(Deserialize)]
struct TaskListPayload {
    tasks: Vec<ExtractedTask>,
}

/// Validate and decode a `{"tasks": [{"title", "quadrant"?}]}` payload
///
/// Rejects malformed JSON, a missing `tasks` array, quadrants outside the
/// four-value enum, and blank titles. Titles are trimmed.
pub fn parse_task_list(raw: &str) -> Result<Vec<ExtractedTask>, ExtractError> {
    let payload: TaskListPayload =
        serde_json::from_str(raw).map_err(|e| ExtractError::InvalidPayload(e.to_string()))?;

    payload
        .tasks
        .into_iter()
        .enumerate()
        .map(|(index, task)| {
            let title = task.title.trim();
            if title.is_empty() {
                return Err(ExtractError::InvalidPayload(format!(
                    "task {} has an empty title",
                    index
                )));
            }
            Ok(ExtractedTask::new(title, task.quadrant))
        })
        .collect()
}
