//! HTTP client for the Taskdeck REST API.
//!
//! Thin wrapper over [`reqwest`] that speaks the `/todos` JSON contract.
//! Server-side rejections (400/404) are decoded into [`ApiError::Rejected`]
//! so callers can log the server's message.

use taskdeck_proto::api::{CreateTaskRequest, DeleteResponse, ErrorResponse, UpdateTaskRequest};
use taskdeck_proto::task::{Task, TaskId};
use url::Url;

/// Errors produced by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured server URL could not be parsed.
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, timeout, or body decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the status line if undecodable.
        message: String,
    },
}

/// Client for the task CRUD endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    todos_url: Url,
}

impl ApiClient {
    /// Build a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        // `Url::join` drops the last path segment unless it ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let todos_url = base.join("todos")?;

        Ok(Self {
            http: reqwest::Client::new(),
            todos_url,
        })
    }

    /// URL of a single task resource.
    fn task_url(&self, id: TaskId) -> Url {
        let mut url = self.todos_url.clone();
        let path = format!("{}/{id}", url.path());
        url.set_path(&path);
        url
    }

    /// Fetch the full task list, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success response.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let resp = self.http.get(self.todos_url.clone()).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Create a task with the given text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with status 400 if the text is blank.
    pub async fn create(&self, text: &str) -> Result<Task, ApiError> {
        let body = CreateTaskRequest::new(text.to_string());
        let resp = self
            .http
            .post(self.todos_url.clone())
            .json(&body)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Update the text and/or completion flag of a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with status 404 for an unknown id
    /// and 400 for blank replacement text.
    pub async fn update(&self, id: TaskId, body: &UpdateTaskRequest) -> Result<Task, ApiError> {
        let resp = self.http.put(self.task_url(id)).json(body).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Delete a task. Succeeds whether or not the id exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success response.
    pub async fn delete(&self, id: TaskId) -> Result<DeleteResponse, ApiError> {
        let resp = self.http.delete(self.task_url(id)).send().await?;
        Ok(check(resp).await?.json().await?)
    }
}

/// Pass through success responses, decode error bodies otherwise.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}
