//! Shared API types for the Taskdeck HTTP contract.
//!
//! Both the server and the terminal client depend on this crate so the
//! JSON wire shape is defined exactly once.

pub mod api;
pub mod task;

pub use api::{CreateTaskRequest, DeleteResponse, ErrorResponse, UpdateTaskRequest};
pub use task::{Task, TaskId};
