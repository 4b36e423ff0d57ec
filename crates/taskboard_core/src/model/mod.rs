//! Board domain model.
//!
//! # Responsibility
//! - Define the task record and the three-valued workflow status.
//! - Define the derived column shape used by views.
//!
//! # Invariants
//! - Every task carries exactly one `TaskStatus`.
//! - Columns are projections; they are never stored.

pub mod column;
pub mod task;
