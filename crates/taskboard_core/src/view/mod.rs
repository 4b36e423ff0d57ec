//! Read-side projections of the task collection.

pub mod column_view;
