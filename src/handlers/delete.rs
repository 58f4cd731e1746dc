//! Delete handler

use crate::TodoApp;
use crate::formatting;
use crate::validation;
use anyhow::Result;

impl TodoApp {
    /// Permanently delete a task
    pub async fn handle_delete(&self, id: &str) -> Result<String> {
        let id = validation::normalize_task_id(id);
        self.store.fetch_tasks().await?;
        self.store.delete_task(&id).await?;

        Ok(format!(
            "Deleted task {}\n\n{}",
            id,
            formatting::format_board(&self.store.tasks())
        ))
    }
}
