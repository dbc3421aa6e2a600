//! API coordinator for wiring the TUI to the async HTTP layer.
//!
//! This module bridges the synchronous TUI event loop (crossterm poll-based)
//! with the async [`ApiClient`]. It spawns a background tokio task and
//! communicates with the main thread via [`ApiCommand`] / [`ApiEvent`]
//! channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── ApiEvent ───  tokio background task
//!                     ─── ApiCommand →
//! ```
//!
//! The main thread sends [`ApiCommand`]s (e.g., add a task) and drains
//! [`ApiEvent`]s (e.g., task created) on each tick of the poll-based
//! event loop. A failed request is logged and produces no event: the
//! local task list simply keeps its previous state.

use tokio::sync::mpsc;

use taskdeck_proto::api::UpdateTaskRequest;
use taskdeck_proto::task::{Task, TaskId};

use crate::api::ApiClient;

/// Commands sent from the TUI main loop to the API background task.
#[derive(Debug)]
pub enum ApiCommand {
    /// Fetch the full task list from the server.
    Refresh,
    /// Create a new task.
    Add {
        /// Text of the task to create.
        text: String,
    },
    /// Flip the completion flag of a task.
    Toggle {
        /// Task to update.
        id: TaskId,
        /// The new value of the flag (already negated by the caller).
        completed: bool,
    },
    /// Replace the text of a task.
    SaveText {
        /// Task to update.
        id: TaskId,
        /// Replacement text.
        text: String,
    },
    /// Delete a task.
    Delete {
        /// Task to delete.
        id: TaskId,
    },
    /// Gracefully shut down the API task.
    Shutdown,
}

/// Events sent from the API background task to the TUI main loop.
#[derive(Debug)]
pub enum ApiEvent {
    /// The full task list was fetched; replaces local state wholesale.
    Loaded(Vec<Task>),
    /// A task was created on the server.
    Created(Task),
    /// A task's completion flag was updated on the server.
    Updated(Task),
    /// A task's text edit was accepted by the server.
    TextSaved {
        /// Task whose text changed.
        id: TaskId,
        /// The text that was sent.
        text: String,
    },
    /// A task was deleted on the server.
    Deleted(TaskId),
}

/// Spawn the API background task and return channel handles.
///
/// Spawns a **command handler** that listens for [`ApiCommand`]s,
/// performs the matching HTTP request, and forwards the server's answer
/// as an [`ApiEvent`]. Requests that fail (transport error or server
/// rejection) are logged with `tracing::warn!` and emit nothing.
#[must_use]
pub fn spawn_api(
    client: ApiClient,
    capacity: usize,
) -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>(capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<ApiEvent>(capacity);

    tokio::spawn(async move {
        command_handler(client, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: handle commands from the TUI main loop.
///
/// Runs until the command channel closes or a [`ApiCommand::Shutdown`]
/// arrives. Event send failures mean the TUI is gone; those are ignored.
async fn command_handler(
    client: ApiClient,
    mut cmd_rx: mpsc::Receiver<ApiCommand>,
    evt_tx: mpsc::Sender<ApiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            ApiCommand::Refresh => match client.list().await {
                Ok(tasks) => {
                    let _ = evt_tx.send(ApiEvent::Loaded(tasks)).await;
                }
                Err(e) => tracing::warn!(error = %e, "list request failed"),
            },
            ApiCommand::Add { text } => match client.create(&text).await {
                Ok(task) => {
                    let _ = evt_tx.send(ApiEvent::Created(task)).await;
                }
                Err(e) => tracing::warn!(error = %e, "create request failed"),
            },
            ApiCommand::Toggle { id, completed } => {
                let body = UpdateTaskRequest::completed(completed);
                match client.update(id, &body).await {
                    Ok(task) => {
                        let _ = evt_tx.send(ApiEvent::Updated(task)).await;
                    }
                    Err(e) => tracing::warn!(%id, error = %e, "toggle request failed"),
                }
            }
            ApiCommand::SaveText { id, text } => {
                let body = UpdateTaskRequest::text(text.clone());
                match client.update(id, &body).await {
                    Ok(_task) => {
                        // The edit box is the source of truth for the new text;
                        // the record from the server is not consulted.
                        let _ = evt_tx.send(ApiEvent::TextSaved { id, text }).await;
                    }
                    Err(e) => tracing::warn!(%id, error = %e, "text update failed"),
                }
            }
            ApiCommand::Delete { id } => match client.delete(id).await {
                Ok(_resp) => {
                    let _ = evt_tx.send(ApiEvent::Deleted(id)).await;
                }
                Err(e) => tracing::warn!(%id, error = %e, "delete request failed"),
            },
            ApiCommand::Shutdown => {
                tracing::info!("api command handler shutting down");
                break;
            }
        }
    }
}
