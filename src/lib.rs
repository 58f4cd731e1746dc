//! Quadrant Tasks Library
//!
//! An Eisenhower-matrix task manager: tasks live in one of four quadrants
//! (important/urgent axes), move between them by drag-and-drop, and can be
//! bulk-added from free text through a pluggable extractor.
//!
//! # Architecture
//!
//! - **View Layer**: `TodoApp` and the `handlers` module - command intents and board rendering
//! - **Store Layer**: `store` module - optimistic task store with snapshot rollback
//! - **Service Layer**: `api` trait with a REST client, or the file-backed `service`
//! - **Domain Layer**: `task`, `visibility`, `dnd`, `extract`
//!
//! # Example
//!
//! ```no_run
//! use quadrant_tasks::{AppConfig, TodoApp};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let app = TodoApp::from_config(&AppConfig::default())?;
//!     println!("{}", app.handle_list(None).await?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dnd;
pub mod extract;
pub mod formatting;
pub mod handlers;
pub mod logging;
pub mod service;
pub mod storage;
pub mod store;
pub mod task;
pub mod validation;
pub mod visibility;

use anyhow::{Context, Result};
use std::sync::Arc;

// Re-export commonly used types
pub use api::{ApiError, HttpTaskApi, HttpTaskApiConfig, TaskApi};
pub use config::{AppConfig, BackendMode};
pub use dnd::{DropMove, resolve_drop};
pub use extract::{ExtractError, ExtractedTask, RuleExtractor, TaskExtractor};
pub use service::LocalTaskService;
pub use storage::Storage;
pub use store::{StoreError, StoreState, TaskStore};
pub use task::{NewTask, Quadrant, Task, TaskUpdate};

/// The quadrant board application
///
/// Owns the task store and exposes one handler per user intent. Handlers
/// return the text to display.
pub struct TodoApp {
    pub(crate) store: TaskStore,
}

impl TodoApp {
    /// Wrap an already constructed store
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// Build the backend, extractor and store described by a config
    ///
    /// # Arguments
    /// * `config` - Application configuration (environment overrides already applied)
    ///
    /// # Returns
    /// Result containing the app or an error
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api: Arc<dyn TaskApi> = match config.backend.mode {
            BackendMode::Remote => {
                let http = HttpTaskApiConfig::new(&config.backend.base_url)
                    .with_timeout(config.backend.timeout());
                Arc::new(HttpTaskApi::new(http)?)
            }
            BackendMode::Local => {
                let extractor = config.build_extractor(|key| std::env::var(key).ok())?;
                let storage = Storage::new(&config.backend.data_file);
                Arc::new(
                    LocalTaskService::open(storage, extractor)
                        .context("Failed to open local task storage")?,
                )
            }
        };

        let policy = visibility::SameDayCompleted::new(config.day_boundary()?);
        Ok(Self::new(TaskStore::new(api).with_policy(policy)))
    }

    /// The underlying task store
    pub fn store(&self) -> &TaskStore {
        &self.store
    }
}
