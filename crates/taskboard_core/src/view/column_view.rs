//! Column derivation over the canonical task collection.
//!
//! # Responsibility
//! - Filter the collection into per-status columns for rendering.
//! - Resolve drop targets to a destination column and slot.
//!
//! # Invariants
//! - Inputs are never mutated.
//! - Column order is collection order filtered by status.
//! - Every task appears in exactly one column of `build_columns`.

use crate::drag::state::DropTarget;
use crate::model::column::Column;
use crate::model::task::{Task, TaskId, TaskStatus};

/// Destination of a drop after resolving card targets to columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub status: TaskStatus,
    /// Slot inside the destination column; `None` appends at the end.
    pub index: Option<usize>,
}

/// Returns the tasks whose status equals `column`, in collection order.
pub fn tasks_in_column(tasks: &[Task], column: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|task| task.status == column).collect()
}

/// Builds one owned column snapshot.
pub fn column_view(tasks: &[Task], column: TaskStatus) -> Column {
    Column {
        id: column,
        title: column.title(),
        tasks: tasks_in_column(tasks, column).into_iter().cloned().collect(),
    }
}

/// Builds all columns in board order.
pub fn build_columns(tasks: &[Task]) -> Vec<Column> {
    TaskStatus::ALL
        .iter()
        .map(|status| column_view(tasks, *status))
        .collect()
}

/// Returns the task's column and its index inside that column.
pub fn position_in_column(tasks: &[Task], id: TaskId) -> Option<(TaskStatus, usize)> {
    let status = tasks.iter().find(|task| task.id == id)?.status;
    let index = tasks
        .iter()
        .filter(|task| task.status == status)
        .position(|task| task.id == id)?;
    Some((status, index))
}

/// Resolves where `dragged` would land when dropped on `target`.
///
/// A card target resolves to the slot that card occupies once `dragged` is
/// taken out of its column. Dropping on the dragged card itself resolves to
/// its current column with no explicit slot. Unknown cards resolve to `None`.
pub fn resolve_drop_target(
    tasks: &[Task],
    target: &DropTarget,
    dragged: TaskId,
) -> Option<ResolvedTarget> {
    match *target {
        DropTarget::Column(status) => Some(ResolvedTarget {
            status,
            index: None,
        }),
        DropTarget::Card(card_id) if card_id == dragged => {
            let status = tasks.iter().find(|task| task.id == dragged)?.status;
            Some(ResolvedTarget {
                status,
                index: None,
            })
        }
        DropTarget::Card(card_id) => {
            let status = tasks.iter().find(|task| task.id == card_id)?.status;
            let index = tasks
                .iter()
                .filter(|task| task.status == status && task.id != dragged)
                .position(|task| task.id == card_id)?;
            Some(ResolvedTarget {
                status,
                index: Some(index),
            })
        }
    }
}
