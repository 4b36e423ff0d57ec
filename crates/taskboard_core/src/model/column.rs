//! Column read model.
//!
//! Columns are derived on every read from the task collection and hold no
//! state of their own.

use crate::model::task::{Task, TaskStatus};
use serde::Serialize;

/// One board column as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: TaskStatus,
    pub title: &'static str,
    /// Tasks whose status equals `id`, in collection order.
    pub tasks: Vec<Task>,
}

impl Column {
    /// Number of cards shown in the column badge.
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
