//! Core use-case services.
//!
//! # Responsibility
//! - Expose presentation-facing intents over the store and drag reconciler.
//! - Hold session-scoped context (login gate, board) as explicit values.

pub mod auth;
pub mod board_service;
pub mod session;
