//! Optimistic task store
//!
//! [`TaskStore`] is the single source of truth for the task collection the
//! view renders. Every mutation goes through the injected [`TaskApi`]:
//! - `add_task` waits for the server (there is no id to roll back against yet)
//! - `edit_task`, `move_task` and `delete_task` apply their change locally
//!   first, then confirm it or restore the pre-call snapshot when the call fails
//! - `toggle_task` delegates to `edit_task`
//! - `bulk_add` asks the service to extract and create tasks, then re-fetches
//!
//! The optimistic operations return futures whose local mutation and
//! snapshot have already happened when the method returns, before the
//! future is first polled. Several operations may be in flight at once; each
//! settles against its own [`PendingMutation`] record. Two in-flight
//! operations on the *same* task are last-writer-wins in settlement order.
//!
//! Failures are returned to the caller and also recorded in the shared
//! `error` field. A later success does not clear it; only `fetch_tasks`
//! (or `reset`) does.

mod pending;

pub use pending::{MutationKind, PendingMutation};

use crate::api::{ApiError, TaskApi};
use crate::dnd::{self, DropMove};
use crate::task::{NewTask, Quadrant, Task, TaskUpdate};
use crate::visibility::{SameDayCompleted, VisibilityPolicy, apply_policy};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Source of "now" for the visibility policy
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Errors returned by store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Text is required")]
    EmptyBulkText,
}

/// Client-visible state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Visible tasks, newest first after a fetch
    pub tasks: Vec<Task>,
    pub is_loading: bool,
    /// Text of the most recent failure
    pub error: Option<String>,
}

/// Task store with optimistic mutation and snapshot rollback
pub struct TaskStore {
    api: Arc<dyn TaskApi>,
    policy: Arc<dyn VisibilityPolicy>,
    clock: Clock,
    state: Mutex<StoreState>,
    next_seq: AtomicU64,
}

impl TaskStore {
    /// Create an empty store over a task API, hiding completed tasks from
    /// previous days in the system local zone
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            policy: Arc::new(SameDayCompleted::default()),
            clock: Arc::new(Utc::now),
            state: Mutex::new(StoreState::default()),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Replace the visibility policy applied on fetch
    pub fn with_policy(mut self, policy: impl VisibilityPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Replace the clock used to evaluate "today"
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Return the store to its freshly constructed state
    pub fn reset(&self) {
        self.with_state(|state| *state = StoreState::default());
        self.next_seq.store(1, Ordering::SeqCst);
    }

    pub fn state(&self) -> StoreState {
        self.with_state(|state| state.clone())
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.with_state(|state| state.tasks.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.with_state(|state| state.is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.with_state(|state| state.error.clone())
    }

    pub fn find(&self, id: &str) -> Option<Task> {
        self.with_state(|state| state.tasks.iter().find(|t| t.id == id).cloned())
    }

    /// Tasks in one quadrant, in collection order
    pub fn tasks_in(&self, quadrant: Quadrant) -> Vec<Task> {
        self.with_state(|state| {
            state
                .tasks
                .iter()
                .filter(|t| t.quadrant == quadrant)
                .cloned()
                .collect()
        })
    }

    /// Replace the whole collection with the server's list
    pub async fn fetch_tasks(&self) -> Result<(), StoreError> {
        self.with_state(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.api.fetch_tasks().await {
            Ok(tasks) => {
                let total = tasks.len();
                let visible = apply_policy(self.policy.as_ref(), (self.clock)(), tasks);
                debug!(total, visible = visible.len(), "fetched tasks");
                self.with_state(|state| {
                    state.tasks = visible;
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                self.with_state(|state| {
                    state.error = Some(e.to_string());
                    state.is_loading = false;
                });
                Err(e.into())
            }
        }
    }

    /// Create a task; the collection changes only once the server answers
    pub async fn add_task(&self, task: NewTask) -> Result<(), StoreError> {
        self.with_state(|state| state.is_loading = true);

        match self.api.create_task(&task).await {
            Ok(created) => {
                info!(id = %created.id, quadrant = %created.quadrant, "task added");
                self.with_state(|state| {
                    state.tasks.insert(0, created);
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "add failed");
                self.with_state(|state| {
                    state.error = Some(e.to_string());
                    state.is_loading = false;
                });
                Err(e.into())
            }
        }
    }

    /// Merge `update` into the task locally, then confirm with the server
    ///
    /// On success the local record is replaced by the server's response; on
    /// failure the collection is restored to its state at call time.
    pub fn edit_task<'a>(
        &'a self,
        id: &str,
        update: TaskUpdate,
    ) -> impl Future<Output = Result<(), StoreError>> + use<'a> {
        let id = id.to_string();
        let pending = self.begin(MutationKind::Edit, &id, |tasks| {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                task.apply(&update);
            }
        });

        async move {
            let outcome = self.api.update_task(&id, &update).await.map(Some);
            self.settle(pending, outcome)
        }
    }

    /// Remove the task locally, then delete it on the server
    pub fn delete_task<'a>(
        &'a self,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + use<'a> {
        let id = id.to_string();
        let pending = self.begin(MutationKind::Delete, &id, |tasks| {
            tasks.retain(|t| t.id != id);
        });

        async move {
            let outcome = self.api.delete_task(&id).await.map(|()| None);
            self.settle(pending, outcome)
        }
    }

    /// Flip the completion flag through `edit_task`
    ///
    /// An id that is not in the collection is a no-op.
    pub fn toggle_task<'a>(
        &'a self,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + use<'a> {
        let edit = self
            .find(id)
            .map(|task| self.edit_task(&task.id, TaskUpdate::completed(!task.completed)));
        let id = id.to_string();

        async move {
            let Some(edit) = edit else {
                debug!(id = %id, "toggle ignored, task not in collection");
                return Ok(());
            };
            if let Err(e) = edit.await {
                self.record_error(&e);
                return Err(e);
            }
            Ok(())
        }
    }

    /// Reassign the task's quadrant locally, then send only the quadrant to the server
    pub fn move_task<'a>(
        &'a self,
        id: &str,
        quadrant: Quadrant,
    ) -> impl Future<Output = Result<(), StoreError>> + use<'a> {
        let id = id.to_string();
        let pending = self.begin(MutationKind::Move, &id, |tasks| {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                task.quadrant = quadrant;
            }
        });

        async move {
            let outcome = self
                .api
                .update_task(&id, &TaskUpdate::quadrant(quadrant))
                .await
                .map(|_| None);
            if outcome.is_ok() {
                info!(id = %id, to = %quadrant, "task moved");
            }
            self.settle(pending, outcome)
        }
    }

    /// Create tasks from free text, then reconcile with the server's collection
    pub async fn bulk_add(&self, text: &str) -> Result<(), StoreError> {
        let text = text.trim();
        if text.is_empty() {
            let e = StoreError::EmptyBulkText;
            self.record_error(&e);
            return Err(e);
        }

        self.with_state(|state| state.is_loading = true);
        match self.api.parse_tasks(text).await {
            Ok(created) => {
                info!(count = created.len(), "bulk add created tasks");
                self.fetch_tasks().await
            }
            Err(e) => {
                warn!(error = %e, "bulk add failed");
                self.with_state(|state| {
                    state.error = Some(e.to_string());
                    state.is_loading = false;
                });
                Err(e.into())
            }
        }
    }

    /// Resolve a drag-end event and move the task when it lands in a new quadrant
    ///
    /// # Returns
    /// The move that was performed, or `None` when the drop resolved to nothing
    pub async fn handle_drop(
        &self,
        active_id: &str,
        over_id: Option<&str>,
    ) -> Result<Option<DropMove>, StoreError> {
        let resolved = self.with_state(|state| dnd::resolve_drop(active_id, over_id, &state.tasks));
        let Some(drop_move) = resolved else {
            return Ok(None);
        };
        self.move_task(&drop_move.task_id, drop_move.to).await?;
        Ok(Some(drop_move))
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn record_error(&self, error: &StoreError) {
        let message = error.to_string();
        self.with_state(|state| state.error = Some(message));
    }

    /// Snapshot the collection and apply an optimistic change in one step
    fn begin(
        &self,
        kind: MutationKind,
        id: &str,
        mutate: impl FnOnce(&mut Vec<Task>),
    ) -> PendingMutation {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.with_state(|state| {
            let snapshot = state.tasks.clone();
            mutate(&mut state.tasks);
            snapshot
        });
        debug!(seq, %kind, id, "optimistic mutation applied");
        PendingMutation::new(seq, kind, id.to_string(), snapshot)
    }

    fn settle(
        &self,
        pending: PendingMutation,
        outcome: Result<Option<Task>, ApiError>,
    ) -> Result<(), StoreError> {
        match outcome {
            Ok(confirmed) => {
                debug!(seq = pending.seq, kind = %pending.kind, id = %pending.task_id, "mutation confirmed");
                self.with_state(|state| pending.confirm(&mut state.tasks, confirmed));
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                warn!(seq = pending.seq, kind = %pending.kind, id = %pending.task_id, error = %message, "mutation rolled back");
                self.with_state(|state| {
                    pending.rollback(&mut state.tasks);
                    state.error = Some(message);
                });
                Err(e.into())
            }
        }
    }
}
