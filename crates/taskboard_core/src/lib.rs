//! Core domain logic for the task board.
//! This crate is the single source of truth for board invariants.

pub mod clock;
pub mod drag;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock, DAY_MS};
pub use drag::reconciler::{DragOutcome, DragReconciler};
pub use drag::state::{ActiveDrag, DragEffect, DragError, DragEvent, DragState, DropTarget};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::column::Column;
pub use model::task::{ParseStatusError, Task, TaskId, TaskStatus, TaskValidationError};
pub use service::auth::{AuthGate, Credential, DEMO_PASSWORD, DEMO_USER_ID};
pub use service::board_service::{BoardError, BoardService};
pub use service::session::{Session, SessionConfig, SessionError};
pub use store::task_store::{
    FieldUpdate, MoveOutcome, NewTask, StoreError, StoreResult, TaskPatch, TaskStore,
};
pub use view::column_view::{build_columns, column_view, tasks_in_column, ResolvedTarget};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
