//! Task API contract
//!
//! [`TaskApi`] is the seam between the task store and whatever owns the
//! authoritative task collection: the remote REST service ([`HttpTaskApi`])
//! or the in-process [`LocalTaskService`](crate::service::LocalTaskService).
//!
//! Every failure is reported as an [`ApiError`] whose `Display` text is the
//! message the store surfaces to the user; the store does not branch on the
//! variant.

mod http;

pub use http::{HttpTaskApi, HttpTaskApiConfig};

use crate::extract::ExtractError;
use crate::task::{NewTask, Task, TaskUpdate};
use async_trait::async_trait;

/// Failure of a task API call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input rejected by validation (4xx)
    #[error("{0}")]
    Validation(String),

    /// The targeted task does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Server-side failure (5xx) or an unexpected status
    #[error("{0}")]
    Server(String),

    /// The request never produced a response
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded
    #[error("{context}: invalid response body: {message}")]
    Decode {
        context: &'static str,
        message: String,
    },

    /// The text-extraction collaborator failed during bulk parse
    #[error("Failed to parse tasks: {0}")]
    Extraction(#[from] ExtractError),

    /// The local document store could not be read or written
    #[error("task storage error: {0}")]
    Storage(String),
}

/// Operations the task store needs from the task service
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// List every task, newest first
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// Create a task and return it with its assigned id and timestamp
    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError>;

    /// Apply a partial update and return the authoritative record
    async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, ApiError>;

    /// Delete a task by id
    async fn delete_task(&self, id: &str) -> Result<(), ApiError>;

    /// Extract tasks from free text, persist them, and return the created records
    async fn parse_tasks(&self, text: &str) -> Result<Vec<Task>, ApiError>;
}
