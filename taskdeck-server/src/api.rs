//! HTTP surface: shared state, router, and the four CRUD handlers.
//!
//! Every handler performs one self-contained store operation and maps the
//! outcome onto the error taxonomy in [`crate::error`]. The store handle
//! is passed explicitly through axum state; there are no process globals.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use taskdeck_proto::api::{CreateTaskRequest, DeleteResponse, UpdateTaskRequest};
use taskdeck_proto::task::{Task, TaskId};

use crate::error::ApiError;
use crate::store::TaskStore;

/// Shared server state: the one store handle.
pub struct AppState {
    /// The task document store.
    pub store: TaskStore,
}

impl AppState {
    /// Wraps a store for use as axum state.
    #[must_use]
    pub const fn new(store: TaskStore) -> Self {
        Self { store }
    }
}

/// Builds the application router.
///
/// The permissive CORS layer mirrors the transport-level allowance the
/// browser-facing deployment needs; there is no auth surface to protect.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_tasks).post(create_task))
        .route("/todos/{id}", put(update_task).delete(delete_task))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /todos` — all tasks, newest first.
async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<Vec<Task>> {
    Json(state.store.list().await)
}

/// `POST /todos` — create a task from trimmed, non-blank text.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Some(text) = body.trimmed_text() else {
        return Err(ApiError::Validation("text is required".to_string()));
    };
    let task = state.store.insert(text.to_string()).await?;
    tracing::debug!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /todos/{id}` — partial update of text and/or completion state.
///
/// Existence is checked before the body is validated, so an unknown id is
/// always a 404 regardless of what the body contains.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TaskId>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    if state.store.get(id).await.is_none() {
        return Err(ApiError::NotFound(id));
    }

    let text = match body.text.as_deref() {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ApiError::Validation("text cannot be empty".to_string()));
            }
            Some(trimmed.to_string())
        }
        None => None,
    };

    match state.store.update(id, text, body.completed).await? {
        Some(task) => {
            tracing::debug!(id = %task.id, "task updated");
            Ok(Json(task))
        }
        // Removed between the existence check and the update.
        None => Err(ApiError::NotFound(id)),
    }
}

/// `DELETE /todos/{id}` — idempotent removal.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TaskId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let existed = state.store.remove(id).await?;
    tracing::debug!(id = %id, existed, "task deleted");
    Ok(Json(DeleteResponse {
        message: "task deleted".to_string(),
    }))
}

/// Starts the server on the given address with a fresh in-memory store.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(AppState::new(TaskStore::in_memory()))).await
}

/// Starts the server with a pre-configured [`AppState`].
///
/// Returns the bound address and a join handle. Binding to port 0 yields
/// an OS-assigned port, which is how tests run an in-process server.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok((bound_addr, handle))
}
