//! Task list view logic
//!
//! Pure functions over the in-memory task list: search filtering and the
//! aggregate counts shown in the stats bar. Rendering lives in the TUI crate.

use super::model::{Task, TaskStatus};

/// Aggregate counts, always derived from the full unfiltered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Count tasks by status over the unfiltered list.
pub fn counts(tasks: &[Task]) -> TaskCounts {
    TaskCounts {
        total: tasks.len(),
        pending: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .count(),
        completed: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count(),
    }
}

/// Tasks whose title or description contains `search`, case-insensitively.
///
/// An absent description is treated as the empty string. An empty search
/// matches everything.
pub fn visible<'a>(tasks: &'a [Task], search: &str) -> Vec<&'a Task> {
    if search.is_empty() {
        return tasks.iter().collect();
    }
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle)
                || t.description
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}
