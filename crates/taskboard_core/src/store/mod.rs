//! Task collection ownership.
//!
//! # Responsibility
//! - Hold the only mutable copy of a board's tasks.
//! - Enforce title/description normalization on every write path.
//!
//! # Invariants
//! - Store errors are local: a failed call leaves the collection as it was.

pub mod task_store;
