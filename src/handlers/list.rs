//! List handler

use crate::TodoApp;
use crate::formatting;
use crate::task::Quadrant;
use anyhow::Result;

impl TodoApp {
    /// Fetch and render the board, or a single quadrant when one is given
    pub async fn handle_list(&self, quadrant: Option<Quadrant>) -> Result<String> {
        self.store.fetch_tasks().await?;

        let tasks = self.store.tasks();
        Ok(match quadrant {
            Some(q) => formatting::format_quadrant(q, &tasks),
            None => formatting::format_board(&tasks),
        })
    }
}
