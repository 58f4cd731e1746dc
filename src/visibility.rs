//! Day-boundary visibility policy
//!
//! Completed tasks stay on the board only for the calendar day they were
//! created on; incomplete tasks are always shown. The policy is applied once
//! per fetch and only hides tasks, it never deletes them.
//!
//! "Today" is evaluated in an explicit [`DayBoundary`]: the system local zone
//! by default, or a fixed UTC offset pinned through configuration.

use crate::task::Task;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

/// Time zone in which calendar days are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    /// The system's local time zone
    #[default]
    Local,
    /// A fixed offset from UTC
    Fixed(FixedOffset),
}

impl DayBoundary {
    /// Build a fixed-offset boundary from minutes east of UTC
    ///
    /// Returns `None` when the offset is out of range (beyond +/- 24h).
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(DayBoundary::Fixed)
    }

    /// Calendar date of an instant in this zone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            DayBoundary::Local => instant.with_timezone(&Local).date_naive(),
            DayBoundary::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }
}

/// Decides whether a fetched task is shown
pub trait VisibilityPolicy: Send + Sync {
    fn is_visible(&self, now: DateTime<Utc>, task: &Task) -> bool;
}

/// Hide completed tasks that were created before the current calendar day
#[derive(Debug, Clone, Copy, Default)]
pub struct SameDayCompleted {
    pub boundary: DayBoundary,
}

impl SameDayCompleted {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }
}

impl VisibilityPolicy for SameDayCompleted {
    fn is_visible(&self, now: DateTime<Utc>, task: &Task) -> bool {
        visible_on(self.boundary.date_of(now), self.boundary, task)
    }
}

/// Show every task regardless of age or completion
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowAll;

impl VisibilityPolicy for ShowAll {
    fn is_visible(&self, _now: DateTime<Utc>, _task: &Task) -> bool {
        true
    }
}

/// Core rule: incomplete tasks are always visible, completed tasks only on
/// the day they were created
pub fn visible_on(today: NaiveDate, boundary: DayBoundary, task: &Task) -> bool {
    if !task.completed {
        return true;
    }
    boundary.date_of(task.created_at) == today
}

/// Filter a fetched collection, preserving order
pub fn apply_policy(
    policy: &dyn VisibilityPolicy,
    now: DateTime<Utc>,
    tasks: Vec<Task>,
) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| policy.is_visible(now, task))
        .collect()
}
