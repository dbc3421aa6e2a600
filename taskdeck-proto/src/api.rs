//! Request and response bodies for the `/todos` endpoints.
//!
//! Input fields are explicitly optional at the serde layer so that a
//! missing field becomes a domain validation error (HTTP 400) in the
//! handlers rather than a framework-level rejection.

use serde::{Deserialize, Serialize};

/// Body of `POST /todos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Text of the new task. Required; must be non-blank after trimming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CreateTaskRequest {
    /// Builds a create request from raw text.
    #[must_use]
    pub const fn new(text: String) -> Self {
        Self { text: Some(text) }
    }

    /// Returns the trimmed text, or `None` if the field is missing or
    /// blank after trimming.
    #[must_use]
    pub fn trimmed_text(&self) -> Option<&str> {
        let trimmed = self.text.as_deref()?.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }
}

/// Body of `PUT /todos/{id}`.
///
/// Omitted fields are left untouched on the stored record (partial update
/// semantics).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// New task text, if the text is being changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New completion state, if it is being changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// An update that only changes the task text.
    #[must_use]
    pub const fn text(text: String) -> Self {
        Self {
            text: Some(text),
            completed: None,
        }
    }

    /// An update that only changes the completion state.
    #[must_use]
    pub const fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }
}

/// Confirmation body of `DELETE /todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Short human-readable confirmation.
    pub message: String,
}

/// Error body for every non-2xx response.
///
/// Carries only a short message; internal details stay in the server logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short human-readable reason.
    pub message: String,
}
