//! Bridge between the UI thread and the async wallet backend.

pub mod commands;
pub mod runtime;
