//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record owned by the task store.
//! - Normalize user-entered text before it reaches the collection.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never blank after trimming.
//! - `description` is either absent or non-blank; never `Some("")`.
//! - `created_at` is captured once and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for one task on the board.
pub type TaskId = Uuid;

/// Workflow stage of a task. Each variant is also one board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board (left-to-right) order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Wire name used in serialized data and by presentation callbacks.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Human-readable column heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl Display for ParseStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown task status `{}`; expected todo|in-progress|done",
            self.0
        )
    }
}

impl Error for ParseStatusError {}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming whitespace.
    EmptyTitle,
    /// Caller-provided id is the nil UUID.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::NilId => write!(f, "task id must not be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<i64>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Builds a task with a fresh random id.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank after trimming.
    pub fn new(
        title: &str,
        status: TaskStatus,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title, status, created_at)
    }

    /// Builds a task with a caller-provided id.
    ///
    /// # Errors
    /// - `NilId` for the nil UUID.
    /// - `EmptyTitle` when `title` is blank after trimming.
    pub fn with_id(
        id: TaskId,
        title: &str,
        status: TaskStatus,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        Ok(Self {
            id,
            title: normalize_title(title)?,
            description: None,
            status,
            deadline: None,
            created_at,
        })
    }

    /// Checks the record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns whether the deadline has passed at `now` (epoch ms).
    pub fn is_overdue(&self, now: i64) -> bool {
        self.deadline.is_some_and(|deadline| deadline < now)
    }
}

/// Trims a title, rejecting blank input.
pub fn normalize_title(value: &str) -> Result<String, TaskValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Trims a description; blank input becomes `None`.
pub fn normalize_description(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
