use crate::task::Task;
use std::fmt;

/// Kind of optimistic mutation awaiting settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Edit,
    Delete,
    Move,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Edit => f.write_str("edit"),
            MutationKind::Delete => f.write_str("delete"),
            MutationKind::Move => f.write_str("move"),
        }
    }
}

/// An optimistic mutation that has been applied locally but not yet confirmed
///
/// The snapshot is the whole collection as it stood immediately before this
/// mutation was applied. Settlement uses only this record: rollback restores
/// its snapshot, confirmation replaces its target with the server's record.
#[derive(Debug, Clone)]
pub struct PendingMutation {
    pub seq: u64,
    pub kind: MutationKind,
    pub task_id: String,
    snapshot: Vec<Task>,
}

impl PendingMutation {
    pub(crate) fn new(seq: u64, kind: MutationKind, task_id: String, snapshot: Vec<Task>) -> Self {
        Self {
            seq,
            kind,
            task_id,
            snapshot,
        }
    }

    /// Collection state captured before the mutation
    pub fn snapshot(&self) -> &[Task] {
        &self.snapshot
    }

    /// Restore the pre-mutation collection
    pub(crate) fn rollback(self, tasks: &mut Vec<Task>) {
        *tasks = self.snapshot;
    }

    /// Apply the server's authoritative record, if the call returned one
    pub(crate) fn confirm(self, tasks: &mut [Task], confirmed: Option<Task>) {
        let Some(confirmed) = confirmed else {
            return;
        };
        if let Some(slot) = tasks.iter_mut().find(|t| t.id == self.task_id) {
            *slot = confirmed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Quadrant;
    use chrono::Utc;

    fn task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            completed: false,
            quadrant: Quadrant::ImportantUrgent,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rollback_restores_snapshot() {
        let before = vec![task("a", "A"), task("b", "B")];
        let pending = PendingMutation::new(1, MutationKind::Delete, "a".into(), before.clone());
        assert_eq!(pending.snapshot(), before.as_slice());

        let mut tasks = vec![task("b", "B")];
        pending.rollback(&mut tasks);
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_confirm_replaces_only_target() {
        let mut tasks = vec![task("a", "edited locally"), task("b", "B")];
        let pending = PendingMutation::new(2, MutationKind::Edit, "a".into(), Vec::new());

        pending.confirm(&mut tasks, Some(task("a", "from server")));
        assert_eq!(tasks[0].title, "from server");
        assert_eq!(tasks[1].title, "B");

        let pending = PendingMutation::new(3, MutationKind::Move, "b".into(), Vec::new());
        pending.confirm(&mut tasks, None);
        assert_eq!(tasks[1].title, "B");
    }
}
