//! Drag-and-drop interaction policy.
//!
//! # Responsibility
//! - Interpret pointer drag events against the task store.
//! - Decide when a status change is previewed and when it is committed.
//!
//! # Invariants
//! - The final status after a gesture depends only on the release target;
//!   with no valid target the grab-time status stays in effect.

pub mod reconciler;
pub mod state;
