//! Queue-based bridge between the GUI thread and the store worker.

pub mod commands;
pub mod runtime;
