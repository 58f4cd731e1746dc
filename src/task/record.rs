use super::quadrant::Quadrant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task in the Eisenhower matrix
///
/// Field names follow the remote API representation: the identifier travels as
/// `_id` (plain `id` is accepted on input) and the creation time as `createdAt`.
/// Unknown fields in a payload (e.g. document version counters) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier assigned by the persistence layer, immutable after creation
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Trimmed, non-empty title
    pub title: String,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Quadrant the task currently lives in
    pub quadrant: Quadrant,
    /// Creation time, set once
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Merge a partial update into this task (only provided fields change)
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(ref title) = update.title {
            self.title = title.clone();
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(quadrant) = update.quadrant {
            self.quadrant = quadrant;
        }
    }
}

/// Payload of the add flow: a task without server-assigned identity or timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub quadrant: Quadrant,
}

impl NewTask {
    /// Incomplete task in the default quadrant
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            quadrant: Quadrant::default(),
        }
    }

    /// Place the new task in a specific quadrant
    pub fn in_quadrant(mut self, quadrant: Quadrant) -> Self {
        self.quadrant = quadrant;
        self
    }
}

/// Partial update for a task; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<Quadrant>,
}

impl TaskUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn quadrant(quadrant: Quadrant) -> Self {
        Self {
            quadrant: Some(quadrant),
            ..Self::default()
        }
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.quadrant.is_none()
    }
}
