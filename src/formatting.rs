//! Text rendering of the quadrant board
//!
//! The CLI's stand-in for the four quadrant containers: one section per
//! quadrant in board order, each listing its tasks in collection order.

use crate::task::{Quadrant, Task};

/// Format one task line: checkbox, title, and id
pub fn format_task(task: &Task) -> String {
    let check = if task.completed { "x" } else { " " };
    format!("  [{}] {} ({})", check, task.title, task.id)
}

/// Format a single quadrant section
///
/// # Arguments
/// * `quadrant` - Quadrant whose heading is printed
/// * `tasks` - Full collection; only tasks in `quadrant` are listed
pub fn format_quadrant(quadrant: Quadrant, tasks: &[Task]) -> String {
    let mut result = format!(
        "{} - {} [{}]\n",
        quadrant.title(),
        quadrant.description(),
        quadrant
    );

    let mut any = false;
    for task in tasks.iter().filter(|t| t.quadrant == quadrant) {
        result.push_str(&format_task(task));
        result.push('\n');
        any = true;
    }
    if !any {
        result.push_str("  (drop tasks here)\n");
    }
    result
}

/// Format the whole board
pub fn format_board(tasks: &[Task]) -> String {
    let sections: Vec<String> = Quadrant::ALL
        .iter()
        .map(|q| format_quadrant(*q, tasks))
        .collect();

    let open = tasks.iter().filter(|t| !t.completed).count();
    format!(
        "{}\n{} task(s), {} open",
        sections.join("\n"),
        tasks.len(),
        open
    )
}

/// Format a store error with the manual recovery hint
pub fn format_error(error: &str) -> String {
    format!("Error: {}\nRun `quadrant-tasks list` to retry.", error)
}
