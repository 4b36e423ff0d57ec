//! Drag gesture state machine.
//!
//! # Responsibility
//! - Model the grab / hover / release gesture as an explicit state value.
//! - Compute transitions as pure functions of state, event and the current
//!   task collection.
//!
//! # Invariants
//! - At most one drag is active; a second grab is rejected.
//! - Hover never asks for a store write. Provisional status lives in
//!   `ActiveDrag` and is visible only through `DragState::project`.
//! - Release, cancel and a vanished task always lead back to `Idle`.
//! - The committed destination is decided by the release target alone.

use crate::model::task::{Task, TaskId, TaskStatus};
use crate::store::task_store::StoreError;
use crate::view::column_view::{resolve_drop_target, ResolvedTarget};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Thing under the pointer while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Empty area of a column.
    Column(TaskStatus),
    /// Another card (or the dragged card itself).
    Card(TaskId),
}

/// Pointer lifecycle input. `None` targets mean "outside any drop zone".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Grab(TaskId),
    Hover(Option<DropTarget>),
    Release(Option<DropTarget>),
    Cancel,
}

/// Data tracked between grab and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDrag {
    pub task_id: TaskId,
    /// Status at grab time; restored on an off-target release.
    pub origin: TaskStatus,
    /// Column the card is currently previewed in.
    pub provisional: TaskStatus,
    /// Last hovered target, overwritten by every hover.
    pub candidate: Option<DropTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEffect {
    /// Nothing to do (event arrived while idle).
    None,
    /// A drag started.
    Begin { task_id: TaskId, status: TaskStatus },
    /// Display the card in `status`; the store is not touched.
    Preview { task_id: TaskId, status: TaskStatus },
    /// Write the drop into the store.
    Commit {
        task_id: TaskId,
        target: ResolvedTarget,
    },
    /// Drop the preview; the grab-time status stands.
    Revert { task_id: TaskId, status: TaskStatus },
    /// The dragged task was deleted mid-gesture.
    Discard { task_id: TaskId },
}

/// Result of one `DragState::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: DragState,
    pub effect: DragEffect,
}

/// Errors from drag lifecycle handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    /// A drag of this task is already active.
    AlreadyDragging(TaskId),
    /// The grabbed task does not exist.
    TaskNotFound(TaskId),
    /// The task is held by the active drag and cannot change status
    /// outside the gesture.
    TaskInFlight(TaskId),
    /// Commit failed in the store.
    Store(StoreError),
}

impl Display for DragError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyDragging(id) => write!(f, "a drag is already active for task {id}"),
            Self::TaskNotFound(id) => write!(f, "cannot drag unknown task {id}"),
            Self::TaskInFlight(id) => {
                write!(f, "task {id} is being dragged; drop or cancel it first")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DragError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for DragError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match self {
            Self::Idle => None,
            Self::Dragging(active) => Some(active),
        }
    }

    /// Computes the next state for `event`.
    ///
    /// # Errors
    /// - `AlreadyDragging` for a grab during an active drag.
    /// - `TaskNotFound` for a grab of an unknown task.
    ///
    /// On error the caller keeps the current state.
    pub fn step(&self, event: &DragEvent, tasks: &[Task]) -> Result<Transition, DragError> {
        let active = match (self, event) {
            (Self::Idle, DragEvent::Grab(task_id)) => {
                let task = tasks
                    .iter()
                    .find(|task| task.id == *task_id)
                    .ok_or(DragError::TaskNotFound(*task_id))?;
                return Ok(Transition {
                    next: Self::Dragging(ActiveDrag {
                        task_id: task.id,
                        origin: task.status,
                        provisional: task.status,
                        candidate: None,
                    }),
                    effect: DragEffect::Begin {
                        task_id: task.id,
                        status: task.status,
                    },
                });
            }
            (Self::Idle, _) => {
                return Ok(Transition {
                    next: Self::Idle,
                    effect: DragEffect::None,
                });
            }
            (Self::Dragging(active), DragEvent::Grab(_)) => {
                return Err(DragError::AlreadyDragging(active.task_id));
            }
            (Self::Dragging(active), _) => *active,
        };

        if !tasks.iter().any(|task| task.id == active.task_id) {
            return Ok(Transition {
                next: Self::Idle,
                effect: DragEffect::Discard {
                    task_id: active.task_id,
                },
            });
        }

        let projected = self.project(tasks);
        let transition = match *event {
            DragEvent::Hover(candidate) => {
                let provisional = candidate
                    .and_then(|target| resolve_drop_target(&projected, &target, active.task_id))
                    .map_or(active.provisional, |resolved| resolved.status);
                Transition {
                    next: Self::Dragging(ActiveDrag {
                        provisional,
                        candidate,
                        ..active
                    }),
                    effect: DragEffect::Preview {
                        task_id: active.task_id,
                        status: provisional,
                    },
                }
            }
            DragEvent::Release(target) => {
                let resolved = target
                    .and_then(|target| resolve_drop_target(&projected, &target, active.task_id));
                let effect = match resolved {
                    Some(target) => DragEffect::Commit {
                        task_id: active.task_id,
                        target,
                    },
                    None => DragEffect::Revert {
                        task_id: active.task_id,
                        status: active.origin,
                    },
                };
                Transition {
                    next: Self::Idle,
                    effect,
                }
            }
            DragEvent::Cancel => Transition {
                next: Self::Idle,
                effect: DragEffect::Revert {
                    task_id: active.task_id,
                    status: active.origin,
                },
            },
            DragEvent::Grab(_) => return Err(DragError::AlreadyDragging(active.task_id)),
        };
        Ok(transition)
    }

    /// Returns `tasks` as they should be displayed right now.
    ///
    /// While a drag previews another column, the dragged task is shown at
    /// the end of that column. Otherwise `tasks` is returned as is.
    pub fn project<'a>(&self, tasks: &'a [Task]) -> Cow<'a, [Task]> {
        let Some(active) = self.active() else {
            return Cow::Borrowed(tasks);
        };
        let Some(position) = tasks.iter().position(|task| task.id == active.task_id) else {
            return Cow::Borrowed(tasks);
        };
        if tasks[position].status == active.provisional {
            return Cow::Borrowed(tasks);
        }

        let mut projected = tasks.to_vec();
        let mut task = projected.remove(position);
        task.status = active.provisional;
        projected.push(task);
        Cow::Owned(projected)
    }
}

#[cfg(test)]
mod tests {
    use super::{DragEffect, DragError, DragEvent, DragState, DropTarget};
    use crate::model::task::{Task, TaskStatus};
    use std::borrow::Cow;

    fn board() -> Vec<Task> {
        vec![
            Task::new("a", TaskStatus::Todo, 0).unwrap(),
            Task::new("b", TaskStatus::Done, 0).unwrap(),
        ]
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let tasks = board();
        for event in [
            DragEvent::Hover(Some(DropTarget::Column(TaskStatus::Done))),
            DragEvent::Release(None),
            DragEvent::Cancel,
        ] {
            let transition = DragState::Idle.step(&event, &tasks).unwrap();
            assert_eq!(transition.next, DragState::Idle);
            assert_eq!(transition.effect, DragEffect::None);
        }
    }

    #[test]
    fn second_grab_is_rejected() {
        let tasks = board();
        let dragging = DragState::Idle
            .step(&DragEvent::Grab(tasks[0].id), &tasks)
            .unwrap()
            .next;
        let err = dragging
            .step(&DragEvent::Grab(tasks[1].id), &tasks)
            .unwrap_err();
        assert_eq!(err, DragError::AlreadyDragging(tasks[0].id));
    }

    #[test]
    fn hover_off_target_keeps_last_preview() {
        let tasks = board();
        let state = DragState::Idle
            .step(&DragEvent::Grab(tasks[0].id), &tasks)
            .unwrap()
            .next;
        let state = state
            .step(
                &DragEvent::Hover(Some(DropTarget::Column(TaskStatus::InProgress))),
                &tasks,
            )
            .unwrap()
            .next;
        let state = state.step(&DragEvent::Hover(None), &tasks).unwrap().next;

        let active = state.active().unwrap();
        assert_eq!(active.provisional, TaskStatus::InProgress);
        assert_eq!(active.candidate, None);
        assert_eq!(active.origin, TaskStatus::Todo);
    }

    #[test]
    fn projection_borrows_when_nothing_is_previewed() {
        let tasks = board();
        assert!(matches!(DragState::Idle.project(&tasks), Cow::Borrowed(_)));
    }

    #[test]
    fn projection_moves_previewed_task_to_column_end() {
        let tasks = board();
        let state = DragState::Idle
            .step(&DragEvent::Grab(tasks[0].id), &tasks)
            .unwrap()
            .next
            .step(
                &DragEvent::Hover(Some(DropTarget::Card(tasks[1].id))),
                &tasks,
            )
            .unwrap()
            .next;

        let projected = state.project(&tasks);
        assert_eq!(projected[1].id, tasks[0].id);
        assert_eq!(projected[1].status, TaskStatus::Done);
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }
}
