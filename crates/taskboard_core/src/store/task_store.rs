//! In-memory task store.
//!
//! # Responsibility
//! - Own the canonical ordered task collection for one board.
//! - Provide create/update/delete/move entry points with atomic semantics.
//!
//! # Invariants
//! - Every operation either fully applies or leaves the collection untouched.
//! - `id` and `created_at` never change after creation.
//! - A status change appends the task at the end of its destination column
//!   unless the caller supplies an explicit slot.
//! - Moving a task to the status it already has, without a slot, is a no-op.

use crate::clock::{Clock, SystemClock, DAY_MS};
use crate::model::task::{
    normalize_description, normalize_title, Task, TaskId, TaskStatus, TaskValidationError,
};
use crate::view::column_view::{position_in_column, tasks_in_column};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from task store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Input failed validation; nothing was changed.
    InvalidInput(TaskValidationError),
    /// No task with this id exists.
    NotFound(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Change to one optional field.
///
/// Keeps "not provided" (`Keep`) apart from "explicitly removed" (`Clear`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Keep,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Input for `TaskStore::create`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Unix epoch milliseconds.
    pub deadline: Option<i64>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn deadline(mut self, deadline_epoch_ms: i64) -> Self {
        self.deadline = Some(deadline_epoch_ms);
        self
    }
}

/// Partial update for `TaskStore::update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub status: Option<TaskStatus>,
    pub deadline: FieldUpdate<i64>,
}

impl TaskPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = FieldUpdate::Set(description.into());
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = FieldUpdate::Clear;
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn deadline(mut self, deadline_epoch_ms: i64) -> Self {
        self.deadline = FieldUpdate::Set(deadline_epoch_ms);
        self
    }

    pub fn clear_deadline(mut self) -> Self {
        self.deadline = FieldUpdate::Clear;
        self
    }

    /// Returns whether applying this patch cannot change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_keep()
            && self.status.is_none()
            && self.deadline.is_keep()
    }
}

/// What a move did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Already in place; nothing changed.
    Unchanged,
    /// Status changed.
    Moved { from: TaskStatus, to: TaskStatus },
    /// Same status, new slot inside the column.
    Reordered {
        status: TaskStatus,
        from_index: usize,
        to_index: usize,
    },
}

/// Canonical owner of one board's tasks.
#[derive(Debug)]
pub struct TaskStore<C: Clock = SystemClock> {
    tasks: Vec<Task>,
    clock: C,
}

impl TaskStore<SystemClock> {
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskStore<C> {
    /// Creates an empty store stamping tasks from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            tasks: Vec::new(),
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// All tasks in canonical order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks in one column, in insertion order.
    pub fn list_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        tasks_in_column(&self.tasks, status)
    }

    /// Appends a new task.
    ///
    /// # Errors
    /// - `InvalidInput(EmptyTitle)` when the title is blank; the collection
    ///   is left unchanged.
    pub fn create(&mut self, draft: NewTask) -> StoreResult<Task> {
        let mut task = Task::new(&draft.title, draft.status, self.clock.now_epoch_ms())?;
        task.description = normalize_description(draft.description.as_deref());
        task.deadline = draft.deadline;
        debug!(
            "event=task_create module=store status=ok task_id={} column={}",
            task.id, task.status
        );
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Applies a partial update, all-or-nothing.
    ///
    /// A status change follows `move_task` semantics.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    /// - `InvalidInput(EmptyTitle)` when a provided title is blank.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> StoreResult<Task> {
        let position = self.position(id).ok_or(StoreError::NotFound(id))?;

        let mut edited = self.tasks[position].clone();
        if let Some(title) = patch.title.as_deref() {
            edited.title = normalize_title(title)?;
        }
        match patch.description {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(text) => edited.description = normalize_description(Some(&text)),
            FieldUpdate::Clear => edited.description = None,
        }
        match patch.deadline {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(deadline) => edited.deadline = Some(deadline),
            FieldUpdate::Clear => edited.deadline = None,
        }
        edited.validate()?;

        let from = edited.status;
        self.tasks[position] = edited;
        if let Some(status) = patch.status {
            if from != status {
                self.relocate(position, status, None);
            }
        }

        debug!("event=task_update module=store status=ok task_id={id}");
        self.get(id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Removes a task. Unknown ids are ignored.
    ///
    /// Returns whether a task was removed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        match self.position(id) {
            Some(position) => {
                self.tasks.remove(position);
                debug!("event=task_delete module=store status=ok task_id={id}");
                true
            }
            None => {
                debug!("event=task_delete module=store status=skipped reason=not_found task_id={id}");
                false
            }
        }
    }

    /// Changes a task's status, appending it to the destination column.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    pub fn move_task(&mut self, id: TaskId, status: TaskStatus) -> StoreResult<MoveOutcome> {
        self.move_to(id, status, None)
    }

    /// Changes a task's status and optionally its slot in the destination
    /// column. `index` is the task's final position inside that column and
    /// is clamped to the column length.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    pub fn move_to(
        &mut self,
        id: TaskId,
        status: TaskStatus,
        index: Option<usize>,
    ) -> StoreResult<MoveOutcome> {
        let position = self.position(id).ok_or(StoreError::NotFound(id))?;
        let from = self.tasks[position].status;

        if from != status {
            self.relocate(position, status, index);
            debug!(
                "event=task_move module=store status=ok task_id={id} from={from} to={status}"
            );
            return Ok(MoveOutcome::Moved { from, to: status });
        }

        let Some(index) = index else {
            return Ok(MoveOutcome::Unchanged);
        };
        let (_, from_index) =
            position_in_column(&self.tasks, id).ok_or(StoreError::NotFound(id))?;
        let last = self.list_by_status(status).len().saturating_sub(1);
        let to_index = index.min(last);
        if to_index == from_index {
            return Ok(MoveOutcome::Unchanged);
        }

        self.relocate(position, status, Some(to_index));
        debug!(
            "event=task_reorder module=store status=ok task_id={id} column={status} from_index={from_index} to_index={to_index}"
        );
        Ok(MoveOutcome::Reordered {
            status,
            from_index,
            to_index,
        })
    }

    /// Fills the store with the starter tasks shown on a fresh board.
    ///
    /// Deadlines are relative to the store clock.
    pub fn seed_demo_tasks(&mut self) -> StoreResult<()> {
        let now = self.clock.now_epoch_ms();
        let starters = [
            NewTask::new("Design new landing page")
                .description("Create wireframes and mockups for the redesigned homepage")
                .deadline(now + 3 * DAY_MS),
            NewTask::new("Set up database schema")
                .description("Define tables and relationships for the project")
                .deadline(now + 7 * DAY_MS),
            NewTask::new("Implement user authentication")
                .description("Add login and signup functionality")
                .status(TaskStatus::InProgress)
                .deadline(now + 2 * DAY_MS),
            NewTask::new("Write API documentation")
                .description("Document all endpoints and their usage")
                .status(TaskStatus::InProgress),
            NewTask::new("Deploy staging environment")
                .description("Set up CI/CD pipeline for staging")
                .status(TaskStatus::Done),
        ];
        for draft in starters {
            self.create(draft)?;
        }
        Ok(())
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Moves the task at `position` into `status`, before the `slot`-th
    /// task of that column, or to the end of the collection.
    fn relocate(&mut self, position: usize, status: TaskStatus, slot: Option<usize>) {
        let mut task = self.tasks.remove(position);
        task.status = status;
        let insert_at = slot
            .and_then(|slot| {
                self.tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, candidate)| candidate.status == status)
                    .nth(slot)
                    .map(|(at, _)| at)
            })
            .unwrap_or(self.tasks.len());
        self.tasks.insert(insert_at, task);
    }
}
