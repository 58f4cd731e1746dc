//! Common test utilities for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use quadrant_tasks::extract::{ExtractError, ExtractedTask, TaskExtractor};
use quadrant_tasks::{ApiError, NewTask, Quadrant, Task, TaskApi, TaskUpdate};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Fixed "now" used by store tests: 2025-03-15 15:00 UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 15, 0, 0).unwrap()
}

/// Create a task record with minimal fields
pub fn create_test_task(id: &str, title: &str, quadrant: Quadrant) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        completed: false,
        quadrant,
        created_at: test_now() - Duration::hours(1),
    }
}

/// Create a completed task created `days_ago` days before [`test_now`]
pub fn create_done_task(id: &str, days_ago: i64) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Done {}", id),
        completed: true,
        quadrant: Quadrant::ImportantUrgent,
        created_at: test_now() - Duration::days(days_ago),
    }
}

/// Handle for a call held open by [`ScriptedApi::hold`]
#[derive(Clone)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    fn new() -> Self {
        Self {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    /// Wait until the held call has been issued
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the held call complete
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// In-memory task API whose calls can be failed or held open per operation
///
/// Operation keys are `fetch`, `create`, `update:<id>`, `delete:<id>` and
/// `parse`; `update:*` and `delete:*` match any id.
pub struct ScriptedApi {
    server: Mutex<Vec<Task>>,
    failing: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, Gate>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl ScriptedApi {
    pub fn new(tasks: Vec<Task>) -> Arc<Self> {
        Arc::new(Self {
            server: Mutex::new(tasks),
            failing: Mutex::new(HashSet::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        })
    }

    /// Make every call matching `key` fail with a server error
    pub fn fail(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    /// Hold the next call matching `key` until the returned gate is released
    pub fn hold(&self, key: &str) -> Gate {
        let gate = Gate::new();
        self.gates.lock().unwrap().insert(key.to_string(), gate.clone());
        gate
    }

    /// Server-side collection
    pub fn server_tasks(&self) -> Vec<Task> {
        self.server.lock().unwrap().clone()
    }

    /// Mutate the server-side collection directly
    pub fn with_server(&self, f: impl FnOnce(&mut Vec<Task>)) {
        f(&mut self.server.lock().unwrap());
    }

    /// Every call issued so far, as operation keys
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn matches(set: &HashSet<String>, key: &str) -> bool {
        let wildcard = key.split(':').next().map(|op| format!("{}:*", op));
        set.contains(key) || wildcard.is_some_and(|w| set.contains(&w))
    }

    async fn enter(&self, key: String, context: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(key.clone());

        let gate = {
            let mut gates = self.gates.lock().unwrap();
            let wildcard = key.split(':').next().map(|op| format!("{}:*", op));
            gates
                .remove(&key)
                .or_else(|| wildcard.and_then(|w| gates.remove(&w)))
        };
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if Self::matches(&self.failing.lock().unwrap(), &key) {
            return Err(ApiError::Server(format!("{}: Server error", context)));
        }
        Ok(())
    }

    fn assign_id(&self) -> String {
        format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl TaskApi for ScriptedApi {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.enter("fetch".to_string(), "Failed to fetch tasks").await?;
        let mut tasks = self.server_tasks();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.enter("create".to_string(), "Failed to create task").await?;
        let created = Task {
            id: self.assign_id(),
            title: task.title.trim().to_string(),
            completed: task.completed,
            quadrant: task.quadrant,
            created_at: test_now(),
        };
        self.server.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
        self.enter(format!("update:{}", id), "Failed to update task").await?;
        let mut server = self.server.lock().unwrap();
        let task = server
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::NotFound("Failed to update task: Task not found".to_string()))?;
        task.apply(update);
        // Server-side normalization the store must pick up on confirmation
        task.title = task.title.trim().to_string();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.enter(format!("delete:{}", id), "Failed to delete task").await?;
        let mut server = self.server.lock().unwrap();
        let before = server.len();
        server.retain(|t| t.id != id);
        if server.len() == before {
            return Err(ApiError::NotFound("Failed to delete task".to_string()));
        }
        Ok(())
    }

    async fn parse_tasks(&self, text: &str) -> Result<Vec<Task>, ApiError> {
        self.enter("parse".to_string(), "Failed to parse tasks").await?;
        let created: Vec<Task> = text
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|title| Task {
                id: self.assign_id(),
                title: title.to_string(),
                completed: false,
                quadrant: Quadrant::default(),
                created_at: test_now(),
            })
            .collect();
        self.server.lock().unwrap().extend(created.iter().cloned());
        Ok(created)
    }
}

/// Extractor that returns a fixed result, or fails when built with [`FixedExtractor::failing`]
pub struct FixedExtractor {
    result: Result<Vec<ExtractedTask>, String>,
    pub seen: Mutex<Vec<String>>,
}

impl FixedExtractor {
    pub fn new(tasks: Vec<ExtractedTask>) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(tasks),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TaskExtractor for FixedExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedTask>, ExtractError> {
        self.seen.lock().unwrap().push(text.to_string());
        match &self.result {
            Ok(tasks) => Ok(tasks.clone()),
            Err(message) => Err(ExtractError::InvalidPayload(message.clone())),
        }
    }
}
