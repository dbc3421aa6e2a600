//! Taskdeck API server library.
//!
//! Exposes the HTTP surface and the task store for use in tests and
//! embedding. The server is a thin CRUD layer: each request performs one
//! self-contained store operation and maps the outcome to an HTTP status.

pub mod api;
pub mod config;
pub mod error;
pub mod store;
