//! Document store for task records.
//!
//! [`TaskStore`] keeps the authoritative task map in memory under an
//! [`RwLock`] and, when configured with a path, snapshots the full
//! collection to a JSON document file after every mutation. The map is
//! only committed once the snapshot write succeeds, so memory and disk
//! never diverge.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::RwLock;

use taskdeck_proto::task::{Task, TaskId};

/// Errors raised by the task store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read the store file.
    #[error("failed to read store file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the store file.
    #[error("failed to write store file {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The store file holds something other than a task collection.
    #[error("failed to decode store file: {0}")]
    Decode(#[from] serde_json::Error),
}

/// In-memory task collection with optional JSON snapshot persistence.
pub struct TaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
    path: Option<PathBuf>,
}

impl TaskStore {
    /// Creates an empty store with no persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            path: None,
        }
    }

    /// Creates an empty store that snapshots to `path` after each mutation.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            path: Some(path),
        }
    }

    /// Opens a store backed by `path`, loading the existing snapshot.
    ///
    /// A missing file is an empty store; the file appears on the first
    /// mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or
    /// decoded.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let records = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<Vec<Task>>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(StoreError::Read {
                    path,
                    source: e,
                });
            }
        };
        let tasks = records.into_iter().map(|t| (t.id, t)).collect();
        Ok(Self {
            tasks: RwLock::new(tasks),
            path: Some(path),
        })
    }

    /// Creates a task with the given (already validated) text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be written; the task
    /// is not kept in that case.
    pub async fn insert(&self, text: String) -> Result<Task, StoreError> {
        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            text,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        let mut tasks = self.tasks.write().await;
        let mut next = tasks.clone();
        next.insert(task.id, task.clone());
        self.persist(&next)?;
        *tasks = next;
        Ok(task)
    }

    /// Returns all tasks ordered by descending creation time.
    pub async fn list(&self) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        let mut records: Vec<Task> = tasks.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        records
    }

    /// Returns the task with the given id, if present.
    pub async fn get(&self, id: TaskId) -> Option<Task> {
        let tasks = self.tasks.read().await;
        tasks.get(&id).cloned()
    }

    /// Applies a partial update to the task with the given id.
    ///
    /// Only provided fields are touched; `updated_at` is bumped. Returns
    /// `Ok(None)` if no task with the id exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be written; the
    /// record is left unchanged in that case.
    pub async fn update(
        &self,
        id: TaskId,
        text: Option<String>,
        completed: Option<bool>,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        let mut next = tasks.clone();
        let Some(task) = next.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(text) = text {
            task.text = text;
        }
        if let Some(completed) = completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();
        let updated = task.clone();

        self.persist(&next)?;
        *tasks = next;
        Ok(Some(updated))
    }

    /// Removes the task with the given id, returning whether it existed.
    ///
    /// Removing an absent id is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be written.
    pub async fn remove(&self, id: TaskId) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        let mut next = tasks.clone();
        let existed = next.remove(&id).is_some();
        if existed {
            self.persist(&next)?;
            *tasks = next;
        }
        Ok(existed)
    }

    /// Writes the snapshot file, if a path is configured.
    fn persist(&self, tasks: &HashMap<TaskId, Task>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut records: Vec<&Task> = tasks.values().collect();
        // Stable file order keeps snapshots diffable.
        records.sort_by_key(|t| t.id);
        let bytes = serde_json::to_vec_pretty(&records)?;
        write_snapshot(path, &bytes)
    }
}

/// Writes snapshot bytes, creating parent directories on first use.
fn write_snapshot(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, bytes).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
