//! Edit, toggle, move and drop handlers

use crate::TodoApp;
use crate::formatting;
use crate::task::{Quadrant, TaskUpdate};
use crate::validation;
use anyhow::{Result, bail};

impl TodoApp {
    /// Inline edit: change the title and/or quadrant of a task
    pub async fn handle_edit(
        &self,
        id: &str,
        title: Option<String>,
        quadrant: Option<Quadrant>,
    ) -> Result<String> {
        let id = validation::normalize_task_id(id);
        let title = match title.as_deref().map(str::trim) {
            Some("") => bail!("Title cannot be empty"),
            Some(t) => Some(t.to_string()),
            None => None,
        };
        let update = TaskUpdate {
            title,
            completed: None,
            quadrant,
        };
        if update.is_empty() {
            bail!("Nothing to update. Provide --title and/or --quadrant.");
        }

        self.store.fetch_tasks().await?;
        self.store.edit_task(&id, update).await?;

        Ok(format!(
            "Task {} updated\n\n{}",
            id,
            formatting::format_board(&self.store.tasks())
        ))
    }

    /// Flip a task between open and done
    pub async fn handle_toggle(&self, id: &str) -> Result<String> {
        let id = validation::normalize_task_id(id);
        self.store.fetch_tasks().await?;

        if self.store.find(&id).is_none() {
            return Ok(format!("Task {} is not on the board; nothing to toggle", id));
        }
        self.store.toggle_task(&id).await?;

        let state = match self.store.find(&id) {
            Some(task) if task.completed => "done",
            _ => "open",
        };
        Ok(format!(
            "Task {} marked {}\n\n{}",
            id,
            state,
            formatting::format_board(&self.store.tasks())
        ))
    }

    /// Move a task into another quadrant
    pub async fn handle_move(&self, id: &str, quadrant: Quadrant) -> Result<String> {
        let id = validation::normalize_task_id(id);
        self.store.fetch_tasks().await?;
        self.store.move_task(&id, quadrant).await?;

        Ok(format!(
            "Task {} moved to {}\n\n{}",
            id,
            quadrant.title(),
            formatting::format_board(&self.store.tasks())
        ))
    }

    /// Drop a task onto a quadrant id or another task's id
    pub async fn handle_drop(&self, id: &str, target: &str) -> Result<String> {
        let id = validation::normalize_task_id(id);
        let target = validation::normalize_task_id(target);
        self.store.fetch_tasks().await?;

        let message = match self.store.handle_drop(&id, Some(&target)).await? {
            Some(mv) => format!(
                "Task {} moved from {} to {}",
                mv.task_id,
                mv.from.title(),
                mv.to.title()
            ),
            None => format!("Dropping {} on {} changes nothing", id, target),
        };
        Ok(format!(
            "{}\n\n{}",
            message,
            formatting::format_board(&self.store.tasks())
        ))
    }
}
