//! Board use-case service.
//!
//! # Responsibility
//! - Provide the intent API the presentation layer calls into.
//! - Route drag events through the reconciler and everything else straight
//!   to the store.
//! - Log each intent outcome as a metadata-only event.
//!
//! # Invariants
//! - Errors are returned to the caller, never escalated; the board stays
//!   usable after any failed intent.
//! - Column snapshots include the provisional preview of an active drag.
//! - The dragged task changes status only through its gesture, so the
//!   preview and the grab-time status stay in step with the store.

use crate::clock::{Clock, SystemClock};
use crate::drag::reconciler::{DragOutcome, DragReconciler};
use crate::drag::state::{DragError, DragEvent, DropTarget};
use crate::model::column::Column;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::store::task_store::{MoveOutcome, NewTask, StoreError, TaskPatch, TaskStore};
use crate::view::column_view::{build_columns, column_view};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from board intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Store(StoreError),
    Drag(DragError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Drag(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Drag(err) => Some(err),
        }
    }
}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DragError> for BoardError {
    fn from(value: DragError) -> Self {
        Self::Drag(value)
    }
}

/// One board: its task store plus its drag lifecycle.
#[derive(Debug)]
pub struct BoardService<C: Clock = SystemClock> {
    store: TaskStore<C>,
    drag: DragReconciler,
}

impl<C: Clock> BoardService<C> {
    pub fn new(store: TaskStore<C>) -> Self {
        Self {
            store,
            drag: DragReconciler::new(),
        }
    }

    pub fn store(&self) -> &TaskStore<C> {
        &self.store
    }

    pub fn drag(&self) -> &DragReconciler {
        &self.drag
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    /// "Add task" intent.
    pub fn add_task(&mut self, draft: NewTask) -> Result<Task, BoardError> {
        let column = draft.status;
        match self.store.create(draft) {
            Ok(task) => {
                info!(
                    "event=task_add module=board status=ok task_id={} column={column}",
                    task.id
                );
                Ok(task)
            }
            Err(err) => {
                warn!("event=task_add module=board status=rejected column={column} error={err}");
                Err(err.into())
            }
        }
    }

    /// "Edit task" intent.
    pub fn edit_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, BoardError> {
        self.ensure_not_dragged(id, patch.status)?;
        match self.store.update(id, patch) {
            Ok(task) => {
                info!("event=task_edit module=board status=ok task_id={id}");
                Ok(task)
            }
            Err(err) => {
                warn!("event=task_edit module=board status=rejected task_id={id} error={err}");
                Err(err.into())
            }
        }
    }

    /// "Delete task" intent. Unknown ids are a no-op.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let removed = self.store.delete(id);
        info!("event=task_delete module=board status=ok task_id={id} removed={removed}");
        removed
    }

    /// Direct status change without a drag gesture.
    ///
    /// # Errors
    /// - `Drag(TaskInFlight)` when `id` is being dragged to another column.
    /// - `Store(NotFound)` for an unknown id.
    pub fn move_task(&mut self, id: TaskId, status: TaskStatus) -> Result<MoveOutcome, BoardError> {
        self.ensure_not_dragged(id, Some(status))?;
        self.store.move_task(id, status).map_err(|err| {
            warn!("event=task_move module=board status=rejected task_id={id} error={err}");
            BoardError::from(err)
        })
    }

    /// Feeds one drag lifecycle event.
    pub fn drag_event(&mut self, event: DragEvent) -> Result<DragOutcome, BoardError> {
        self.drag.dispatch(&mut self.store, event).map_err(|err| {
            warn!("event=drag module=board status=rejected error={err}");
            BoardError::from(err)
        })
    }

    pub fn grab(&mut self, id: TaskId) -> Result<DragOutcome, BoardError> {
        self.drag_event(DragEvent::Grab(id))
    }

    pub fn hover(&mut self, target: Option<DropTarget>) -> Result<DragOutcome, BoardError> {
        self.drag_event(DragEvent::Hover(target))
    }

    pub fn release(&mut self, target: Option<DropTarget>) -> Result<DragOutcome, BoardError> {
        self.drag_event(DragEvent::Release(target))
    }

    pub fn cancel_drag(&mut self) -> Result<DragOutcome, BoardError> {
        self.drag_event(DragEvent::Cancel)
    }

    fn ensure_not_dragged(&self, id: TaskId, status: Option<TaskStatus>) -> Result<(), BoardError> {
        let Some(status) = status else {
            return Ok(());
        };
        if self.drag.active_task() != Some(id)
            || self.store.get(id).is_some_and(|task| task.status == status)
        {
            return Ok(());
        }
        warn!("event=task_status module=board status=rejected task_id={id} reason=dragging");
        Err(DragError::TaskInFlight(id).into())
    }

    /// All columns as currently displayed.
    pub fn columns(&self) -> Vec<Column> {
        build_columns(&self.drag.project(self.store.tasks()))
    }

    /// One column as currently displayed.
    pub fn column(&self, status: TaskStatus) -> Column {
        column_view(&self.drag.project(self.store.tasks()), status)
    }
}
