//! Worker side of the UI: command types and the thread that runs them.

pub mod commands;
pub mod runtime;
