//! Request validation for the local task service
//!
//! Mirrors the checks the remote API applies before touching persistence:
//! titles must be non-empty after trimming, ids must be well-formed, and bulk
//! parse text must not be blank. Quadrants are validated by the type system.

use crate::api::ApiError;
use crate::task::{NewTask, TaskUpdate};
use uuid::Uuid;

/// Validate and normalize a create payload
///
/// # Returns
/// The payload with its title trimmed, or a validation error
pub fn validate_new_task(task: &NewTask) -> Result<NewTask, ApiError> {
    let title = task.title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }
    Ok(NewTask {
        title: title.to_string(),
        ..task.clone()
    })
}

/// Validate and normalize a partial update
///
/// A provided title must be non-empty after trimming; absent fields pass through.
pub fn validate_update(update: &TaskUpdate) -> Result<TaskUpdate, ApiError> {
    let title = match update.title.as_deref().map(str::trim) {
        Some("") => return Err(ApiError::Validation("Title cannot be empty".to_string())),
        Some(t) => Some(t.to_string()),
        None => None,
    };
    Ok(TaskUpdate {
        title,
        ..update.clone()
    })
}

/// Check that an id has the shape the document store assigns
pub fn validate_task_id(id: &str) -> Result<(), ApiError> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| ApiError::Validation("Invalid task ID".to_string()))
}

/// Validate bulk parse input
///
/// # Returns
/// The trimmed text, or a validation error when it is blank
pub fn validate_parse_text(text: &str) -> Result<&str, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("Text is required".to_string()));
    }
    Ok(trimmed)
}

/// Normalize a task id typed by the user (surrounding whitespace removed)
pub fn normalize_task_id(task_id: &str) -> String {
    task_id.trim().to_string()
}
