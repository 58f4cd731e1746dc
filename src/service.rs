//! In-process task service
//!
//! [`LocalTaskService`] implements [`TaskApi`] on top of the TOML document
//! [`Storage`] and an injected [`TaskExtractor`], applying the same validation
//! and defaults as the remote service. It backs the CLI's local mode and the
//! end-to-end tests.

use crate::api::{ApiError, TaskApi};
use crate::extract::TaskExtractor;
use crate::storage::{Storage, TaskDocument};
use crate::task::{NewTask, Task, TaskUpdate};
use crate::validation;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// File-backed implementation of the task API
pub struct LocalTaskService {
    storage: Storage,
    extractor: Arc<dyn TaskExtractor>,
    document: Mutex<TaskDocument>,
}

impl LocalTaskService {
    /// Open the service over a storage file, loading any existing tasks
    pub fn open(storage: Storage, extractor: Arc<dyn TaskExtractor>) -> anyhow::Result<Self> {
        let document = storage.load()?;
        debug!(path = %storage.path().display(), tasks = document.tasks.len(), "opened task storage");
        Ok(Self {
            storage,
            extractor,
            document: Mutex::new(document),
        })
    }

    fn persist(&self, document: &TaskDocument) -> Result<(), ApiError> {
        self.storage
            .save(document)
            .map_err(|e| ApiError::Storage(format!("{:#}", e)))
    }

    fn new_record(task: NewTask) -> Task {
        Task {
            id: Uuid::new_v4().simple().to_string(),
            title: task.title,
            completed: task.completed,
            quadrant: task.quadrant,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl TaskApi for LocalTaskService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let document = self.document.lock().await;
        let mut tasks = document.tasks.clone();
        // Stable sort keeps insertion order among equal timestamps
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        let task = validation::validate_new_task(task)?;
        let record = Self::new_record(task);

        let mut document = self.document.lock().await;
        document.tasks.push(record.clone());
        if let Err(e) = self.persist(&document) {
            document.tasks.pop();
            return Err(e);
        }
        info!(id = %record.id, quadrant = %record.quadrant, "task created");
        Ok(record)
    }

    async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
        validation::validate_task_id(id)?;
        let update = validation::validate_update(update)?;

        let mut document = self.document.lock().await;
        let Some(index) = document.tasks.iter().position(|t| t.id == id) else {
            return Err(ApiError::NotFound("Task not found".to_string()));
        };

        let previous = document.tasks[index].clone();
        document.tasks[index].apply(&update);
        if let Err(e) = self.persist(&document) {
            document.tasks[index] = previous;
            return Err(e);
        }
        Ok(document.tasks[index].clone())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        validation::validate_task_id(id)?;

        let mut document = self.document.lock().await;
        let Some(index) = document.tasks.iter().position(|t| t.id == id) else {
            return Err(ApiError::NotFound("Task not found".to_string()));
        };

        let removed = document.tasks.remove(index);
        if let Err(e) = self.persist(&document) {
            document.tasks.insert(index, removed);
            return Err(e);
        }
        info!(id = %id, "task deleted");
        Ok(())
    }

    async fn parse_tasks(&self, text: &str) -> Result<Vec<Task>, ApiError> {
        let text = validation::validate_parse_text(text)?;
        let extracted = self.extractor.extract(text).await?;

        let created: Vec<Task> = extracted
            .into_iter()
            .map(|candidate| {
                let quadrant = candidate.quadrant_or_default();
                Self::new_record(NewTask::new(candidate.title).in_quadrant(quadrant))
            })
            .collect();

        let mut document = self.document.lock().await;
        let before = document.tasks.len();
        document.tasks.extend(created.iter().cloned());
        if let Err(e) = self.persist(&document) {
            document.tasks.truncate(before);
            return Err(e);
        }
        info!(count = created.len(), "tasks created from text");
        Ok(created)
    }
}
