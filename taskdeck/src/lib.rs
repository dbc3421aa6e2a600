//! Taskdeck — terminal task-list client library.

pub mod api;
pub mod config;
pub mod net;
pub mod state;
pub mod ui;
