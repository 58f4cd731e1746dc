use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Eisenhower matrix quadrant a task is classified into
///
/// Serialized in kebab-case (`important-urgent`, ...) to match the wire format
/// of the remote task API and the droppable identities of the quadrant containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    /// Critical tasks that need immediate attention
    #[default]
    ImportantUrgent,
    /// Important tasks that can be scheduled
    ImportantNotUrgent,
    /// Tasks that feel urgent but aren't important
    NotImportantUrgent,
    /// Tasks that can be eliminated or delegated
    NotImportantNotUrgent,
}

impl Quadrant {
    /// All quadrants in board order (top-left to bottom-right)
    pub const ALL: [Quadrant; 4] = [
        Quadrant::ImportantUrgent,
        Quadrant::ImportantNotUrgent,
        Quadrant::NotImportantUrgent,
        Quadrant::NotImportantNotUrgent,
    ];

    /// Wire identifier, e.g. `important-urgent`
    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::ImportantUrgent => "important-urgent",
            Quadrant::ImportantNotUrgent => "important-not-urgent",
            Quadrant::NotImportantUrgent => "not-important-urgent",
            Quadrant::NotImportantNotUrgent => "not-important-not-urgent",
        }
    }

    /// Short board heading for the quadrant
    pub fn title(&self) -> &'static str {
        match self {
            Quadrant::ImportantUrgent => "Do First",
            Quadrant::ImportantNotUrgent => "Schedule",
            Quadrant::NotImportantUrgent => "Delegate",
            Quadrant::NotImportantNotUrgent => "Don't Do",
        }
    }

    /// Axis description shown under the heading
    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::ImportantUrgent => "Important & Urgent",
            Quadrant::ImportantNotUrgent => "Important & Not Urgent",
            Quadrant::NotImportantUrgent => "Not Important & Urgent",
            Quadrant::NotImportantNotUrgent => "Not Important & Not Urgent",
        }
    }

    /// Build a quadrant from the two matrix axes
    pub fn from_axes(important: bool, urgent: bool) -> Self {
        match (important, urgent) {
            (true, true) => Quadrant::ImportantUrgent,
            (true, false) => Quadrant::ImportantNotUrgent,
            (false, true) => Quadrant::NotImportantUrgent,
            (false, false) => Quadrant::NotImportantNotUrgent,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "important-urgent" => Ok(Quadrant::ImportantUrgent),
            "important-not-urgent" => Ok(Quadrant::ImportantNotUrgent),
            "not-important-urgent" => Ok(Quadrant::NotImportantUrgent),
            "not-important-not-urgent" => Ok(Quadrant::NotImportantNotUrgent),
            _ => Err(format!(
                "Invalid quadrant '{}'. Valid options are: important-urgent, important-not-urgent, not-important-urgent, not-important-not-urgent",
                s
            )),
        }
    }
}
