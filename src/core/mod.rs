//! Plugin lifecycle and session orchestration

pub mod plugin;
