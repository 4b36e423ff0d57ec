//! Applies drag transitions to a task store.
//!
//! # Responsibility
//! - Own the single active `DragState` of a board.
//! - Turn one grab/hover/release gesture into zero or one store mutation.
//!
//! # Invariants
//! - The state is replaced before the effect is applied, so the reconciler
//!   is back to `Idle` after every release or cancel, even when the commit
//!   fails.
//! - Off-target release and cancel never write the store.

use crate::clock::Clock;
use crate::drag::state::{DragEffect, DragError, DragEvent, DragState, DropTarget};
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::store::task_store::{MoveOutcome, TaskStore};
use log::{debug, info};
use std::borrow::Cow;

/// What one drag event did, as reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No drag was active.
    Ignored,
    Grabbed {
        task_id: TaskId,
        status: TaskStatus,
    },
    /// Card is being shown in `status`; nothing is committed yet.
    Previewing {
        task_id: TaskId,
        status: TaskStatus,
    },
    /// Drop committed. `outcome` is `Unchanged` for a drop back in place.
    Committed {
        task_id: TaskId,
        outcome: MoveOutcome,
    },
    /// Drop abandoned; the task keeps `status`.
    Reverted {
        task_id: TaskId,
        status: TaskStatus,
    },
    /// Dragged task no longer exists.
    Discarded { task_id: TaskId },
}

/// Drag lifecycle driver for one board.
#[derive(Debug, Default)]
pub struct DragReconciler {
    state: DragState,
}

impl DragReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Id of the task currently held, if any.
    pub fn active_task(&self) -> Option<TaskId> {
        self.state.active().map(|active| active.task_id)
    }

    /// Feeds one pointer event through the state machine.
    ///
    /// # Errors
    /// - `AlreadyDragging` / `TaskNotFound` from an invalid grab; the state
    ///   is left as it was.
    /// - Store errors from a failed commit; the state is already `Idle`.
    pub fn dispatch<C: Clock>(
        &mut self,
        store: &mut TaskStore<C>,
        event: DragEvent,
    ) -> Result<DragOutcome, DragError> {
        let transition = self.state.step(&event, store.tasks())?;
        self.state = transition.next;

        match transition.effect {
            DragEffect::None => Ok(DragOutcome::Ignored),
            DragEffect::Begin { task_id, status } => {
                debug!("event=drag_start module=drag status=ok task_id={task_id} column={status}");
                Ok(DragOutcome::Grabbed { task_id, status })
            }
            DragEffect::Preview { task_id, status } => {
                Ok(DragOutcome::Previewing { task_id, status })
            }
            DragEffect::Commit { task_id, target } => {
                let outcome = store.move_to(task_id, target.status, target.index)?;
                info!(
                    "event=drag_drop module=drag status=committed task_id={task_id} column={} outcome={outcome:?}",
                    target.status
                );
                Ok(DragOutcome::Committed { task_id, outcome })
            }
            DragEffect::Revert { task_id, status } => {
                let status = store.get(task_id).map_or(status, |task| task.status);
                info!("event=drag_drop module=drag status=reverted task_id={task_id} column={status}");
                Ok(DragOutcome::Reverted { task_id, status })
            }
            DragEffect::Discard { task_id } => {
                info!("event=drag_drop module=drag status=discarded task_id={task_id}");
                Ok(DragOutcome::Discarded { task_id })
            }
        }
    }

    pub fn grab<C: Clock>(
        &mut self,
        store: &mut TaskStore<C>,
        task_id: TaskId,
    ) -> Result<DragOutcome, DragError> {
        self.dispatch(store, DragEvent::Grab(task_id))
    }

    pub fn hover<C: Clock>(
        &mut self,
        store: &mut TaskStore<C>,
        target: Option<DropTarget>,
    ) -> Result<DragOutcome, DragError> {
        self.dispatch(store, DragEvent::Hover(target))
    }

    pub fn release<C: Clock>(
        &mut self,
        store: &mut TaskStore<C>,
        target: Option<DropTarget>,
    ) -> Result<DragOutcome, DragError> {
        self.dispatch(store, DragEvent::Release(target))
    }

    pub fn cancel<C: Clock>(&mut self, store: &mut TaskStore<C>) -> Result<DragOutcome, DragError> {
        self.dispatch(store, DragEvent::Cancel)
    }

    /// Collection as displayed, including any provisional preview.
    pub fn project<'a>(&self, tasks: &'a [Task]) -> Cow<'a, [Task]> {
        self.state.project(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::{DragOutcome, DragReconciler};
    use crate::clock::FixedClock;
    use crate::drag::state::DropTarget;
    use crate::model::task::TaskStatus;
    use crate::store::task_store::{MoveOutcome, NewTask, TaskStore};

    #[test]
    fn state_returns_to_idle_after_release() {
        let mut store = TaskStore::with_clock(FixedClock::new(0));
        let task = store.create(NewTask::new("card")).unwrap();
        let mut drag = DragReconciler::new();

        drag.grab(&mut store, task.id).unwrap();
        assert_eq!(drag.active_task(), Some(task.id));

        let outcome = drag
            .release(&mut store, Some(DropTarget::Column(TaskStatus::Todo)))
            .unwrap();
        assert_eq!(
            outcome,
            DragOutcome::Committed {
                task_id: task.id,
                outcome: MoveOutcome::Unchanged,
            }
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn hover_alone_does_not_write_store() {
        let mut store = TaskStore::with_clock(FixedClock::new(0));
        let task = store.create(NewTask::new("card")).unwrap();
        let mut drag = DragReconciler::new();

        drag.grab(&mut store, task.id).unwrap();
        let outcome = drag
            .hover(&mut store, Some(DropTarget::Column(TaskStatus::Done)))
            .unwrap();

        assert_eq!(
            outcome,
            DragOutcome::Previewing {
                task_id: task.id,
                status: TaskStatus::Done,
            }
        );
        assert_eq!(store.get(task.id).unwrap().status, TaskStatus::Todo);
        assert_eq!(drag.project(store.tasks())[0].status, TaskStatus::Done);
    }
}
