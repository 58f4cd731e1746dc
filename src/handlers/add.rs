//! Add and bulk-add handlers

use crate::TodoApp;
use crate::formatting;
use crate::task::{NewTask, Quadrant};
use anyhow::{Result, bail};

impl TodoApp {
    /// Add a single task, in the default quadrant unless one is given
    pub async fn handle_add(&self, title: &str, quadrant: Option<Quadrant>) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            bail!("Title is required");
        }

        self.store.fetch_tasks().await?;
        self.store
            .add_task(NewTask::new(title).in_quadrant(quadrant.unwrap_or_default()))
            .await?;

        let tasks = self.store.tasks();
        Ok(format!(
            "Added \"{}\"\n\n{}",
            title,
            formatting::format_board(&tasks)
        ))
    }

    /// Extract tasks from free text and add them all
    pub async fn handle_bulk(&self, text: &str) -> Result<String> {
        self.store.fetch_tasks().await?;
        let before = self.store.tasks().len();

        self.store.bulk_add(text).await?;

        let tasks = self.store.tasks();
        let added = tasks.len().saturating_sub(before);
        Ok(format!(
            "Added {} task(s) from text\n\n{}",
            added,
            formatting::format_board(&tasks)
        ))
    }
}
