//! Task domain model
//!
//! - `quadrant`: the four Eisenhower matrix buckets and their display metadata
//! - `record`: the persisted task record plus the create/update payloads

mod quadrant;
mod record;

pub use quadrant::Quadrant;
pub use record::{NewTask, Task, TaskUpdate};
