//! Drag-and-drop reclassification
//!
//! Each rendered task is draggable under its id and each quadrant container
//! is droppable under its quadrant's wire value. When a drag ends over a
//! target, [`resolve_drop`] decides which quadrant (if any) the dragged task
//! moves to:
//! - a quadrant container id moves the task into that quadrant
//! - another task's id moves the task into that task's quadrant
//! - no target, an unknown target, or the task itself resolves to nothing
//!
//! A move only results when the destination differs from the task's
//! current quadrant.

use crate::task::{Quadrant, Task};

/// Identity of whatever the dragged task was released over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A quadrant container
    Quadrant(Quadrant),
    /// Another task card
    Task(String),
}

impl DropTarget {
    /// Interpret a raw droppable id: quadrant ids win over task ids
    pub fn from_id(id: &str) -> Self {
        match id.parse::<Quadrant>() {
            Ok(quadrant) => DropTarget::Quadrant(quadrant),
            Err(_) => DropTarget::Task(id.to_string()),
        }
    }
}

/// A resolved reclassification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropMove {
    pub task_id: String,
    pub from: Quadrant,
    pub to: Quadrant,
}

/// Resolve a drag-end event into a move
///
/// # Arguments
/// * `active_id` - id of the dragged task
/// * `over_id` - droppable id under the pointer on release, if any
/// * `tasks` - the collection currently rendered
pub fn resolve_drop(active_id: &str, over_id: Option<&str>, tasks: &[Task]) -> Option<DropMove> {
    let over_id = over_id?;
    if over_id == active_id {
        return None;
    }

    let source = tasks.iter().find(|t| t.id == active_id)?;
    let destination = match DropTarget::from_id(over_id) {
        DropTarget::Quadrant(quadrant) => quadrant,
        DropTarget::Task(target_id) => tasks.iter().find(|t| t.id == target_id)?.quadrant,
    };

    if destination == source.quadrant {
        return None;
    }

    Some(DropMove {
        task_id: source.id.clone(),
        from: source.quadrant,
        to: destination,
    })
}
