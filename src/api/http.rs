//! REST client for the remote task service
//!
//! Endpoints, relative to the configured base URL:
//! - `GET /tasks`, `POST /tasks`, `POST /tasks/parse`
//! - `PATCH /tasks/{id}`, `DELETE /tasks/{id}`

use super::{ApiError, TaskApi};
use crate::task::{NewTask, Task, TaskUpdate};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Configuration for [`HttpTaskApi`]
#[derive(Debug, Clone)]
pub struct HttpTaskApiConfig {
    /// API root, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpTaskApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Stateless HTTP wrapper around the remote task API
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    config: HttpTaskApiConfig,
    client: reqwest::Client,
}

impl HttpTaskApi {
    pub fn new(config: HttpTaskApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                context: "Failed to build HTTP client",
                source,
            })?;
        Ok(Self { config, client })
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.config.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/tasks/{}", self.config.base_url, id)
    }
}

/// Pull a human-readable message out of an error body
///
/// Understands `{"message": ...}` and validator-style `{"errors": [{"msg": ...}]}`
/// bodies; anything else is returned as-is.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.get("message").and_then(|m| m.as_str()).or_else(|| {
                v.get("errors")
                    .and_then(|e| e.get(0))
                    .and_then(|e| e.get("msg"))
                    .and_then(|m| m.as_str())
            })
        })
        .map(String::from)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Map a non-success response to an [`ApiError`] carrying call context
async fn failure(context: &'static str, response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = error_message(&body);
    let message = if detail.is_empty() {
        context.to_string()
    } else {
        format!("{}: {}", context, detail)
    };

    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        s if s.is_client_error() => ApiError::Validation(message),
        _ => ApiError::Server(message),
    }
}

async fn send(
    context: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|source| ApiError::Transport { context, source })?;
    if !response.status().is_success() {
        return Err(failure(context, response).await);
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(
    context: &'static str,
    response: Response,
) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| ApiError::Decode {
        context,
        message: e.to_string(),
    })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        const CONTEXT: &str = "Failed to fetch tasks";
        debug!(url = %self.tasks_url(), "GET tasks");
        let response = send(CONTEXT, self.client.get(self.tasks_url())).await?;
        decode(CONTEXT, response).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        const CONTEXT: &str = "Failed to create task";
        let response = send(CONTEXT, self.client.post(self.tasks_url()).json(task)).await?;
        decode(CONTEXT, response).await
    }

    async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
        const CONTEXT: &str = "Failed to update task";
        if id.trim().is_empty() {
            return Err(ApiError::Validation(
                "Task ID is required for update".to_string(),
            ));
        }
        let response = send(CONTEXT, self.client.patch(self.task_url(id)).json(update)).await?;
        decode(CONTEXT, response).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        const CONTEXT: &str = "Failed to delete task";
        if id.trim().is_empty() {
            return Err(ApiError::Validation(
                "Task ID is required for delete".to_string(),
            ));
        }
        send(CONTEXT, self.client.delete(self.task_url(id))).await?;
        Ok(())
    }

    async fn parse_tasks(&self, text: &str) -> Result<Vec<Task>, ApiError> {
        const CONTEXT: &str = "Failed to parse tasks";
        let url = format!("{}/parse", self.tasks_url());
        let response = send(CONTEXT, self.client.post(url).json(&json!({ "text": text }))).await?;
        decode(CONTEXT, response).await
    }
}
