//! Application state and event handling.
//!
//! [`App`] is the client-side mirror of the server's task list. Key
//! events may produce an [`ApiCommand`] for the background task; server
//! answers come back as [`ApiEvent`]s and are applied via
//! [`App::apply_event`]. Nothing mutates the mirror optimistically: a
//! request that never produces an event leaves the list untouched.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_proto::task::{Task, TaskId};

use crate::net::{ApiCommand, ApiEvent};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Input box is focused (default).
    Input,
    /// Task list is focused.
    List,
}

/// Main application state.
pub struct App {
    /// Local mirror of the server's task list, newest first.
    pub tasks: Vec<Task>,
    /// Text being typed for a new task.
    pub draft_text: String,
    /// Task currently being edited, if any.
    pub editing_id: Option<TaskId>,
    /// Edit buffer for the task being edited.
    pub editing_text: String,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Selected row in the task list.
    pub selected: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create an empty application; the first `Loaded` event fills it.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            draft_text: String::new(),
            editing_id: None,
            editing_text: String::new(),
            focus: PanelFocus::Input,
            selected: 0,
            should_quit: false,
        }
    }

    /// Handle a key event, optionally producing a command for the server.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        // Ctrl+C quits from anywhere, edit mode included.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Some(ApiCommand::Shutdown);
        }

        // Edit mode is modal: it captures every key until saved or cancelled.
        if self.editing_id.is_some() {
            return self.handle_edit_key(key);
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return Some(ApiCommand::Shutdown);
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::List => self.handle_list_key(key),
        }
    }

    /// Handle key event when the input box is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Char(c) => {
                self.draft_text.push(c);
                None
            }
            KeyCode::Backspace => {
                self.draft_text.pop();
                None
            }
            _ => None,
        }
    }

    /// Handle key event when the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('e') => {
                self.begin_edit();
                None
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('r') => Some(ApiCommand::Refresh),
            KeyCode::Char('q') => {
                self.should_quit = true;
                Some(ApiCommand::Shutdown)
            }
            _ => None,
        }
    }

    /// Handle key event while a task edit is in progress.
    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Esc => {
                self.cancel_edit();
                None
            }
            KeyCode::Enter => self.submit_edit(),
            KeyCode::Char(c) => {
                self.editing_text.push(c);
                None
            }
            KeyCode::Backspace => {
                self.editing_text.pop();
                None
            }
            _ => None,
        }
    }

    /// Switch focus between the input box and the task list.
    const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::List,
            PanelFocus::List => PanelFocus::Input,
        };
    }

    /// Submit the draft as a new task. Blank drafts submit nothing.
    ///
    /// The draft is cleared only when the `Created` event comes back,
    /// so a failed request keeps the typed text.
    fn submit_draft(&self) -> Option<ApiCommand> {
        if self.draft_text.trim().is_empty() {
            return None;
        }
        Some(ApiCommand::Add {
            text: self.draft_text.clone(),
        })
    }

    /// Flip the completion flag of the selected task.
    ///
    /// The command carries the negated value explicitly so the server
    /// never has to guess the current state.
    fn toggle_selected(&self) -> Option<ApiCommand> {
        let task = self.selected_task()?;
        Some(ApiCommand::Toggle {
            id: task.id,
            completed: !task.completed,
        })
    }

    /// Start editing the selected task, seeding the buffer with its text.
    fn begin_edit(&mut self) {
        if let Some((id, text)) = self.selected_task().map(|t| (t.id, t.text.clone())) {
            self.editing_id = Some(id);
            self.editing_text = text;
        }
    }

    /// Abandon the edit without contacting the server.
    fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.editing_text.clear();
    }

    /// Submit the edit buffer. Blank text submits nothing and keeps the
    /// edit open.
    fn submit_edit(&self) -> Option<ApiCommand> {
        let id = self.editing_id?;
        if self.editing_text.trim().is_empty() {
            return None;
        }
        Some(ApiCommand::SaveText {
            id,
            text: self.editing_text.clone(),
        })
    }

    /// Delete the selected task.
    fn delete_selected(&self) -> Option<ApiCommand> {
        let task = self.selected_task()?;
        Some(ApiCommand::Delete { id: task.id })
    }

    /// The task under the selection cursor, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Move selection up.
    const fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down.
    fn select_next(&mut self) {
        if self.selected < self.tasks.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Apply a server answer to the local mirror.
    pub fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded(tasks) => {
                self.tasks = tasks;
            }
            ApiEvent::Created(task) => {
                self.tasks.push(task);
                self.draft_text.clear();
            }
            ApiEvent::Updated(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
            }
            ApiEvent::TextSaved { id, text } => {
                // The text the user typed wins over the server's record.
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.text = text;
                }
                self.editing_id = None;
                self.editing_text.clear();
            }
            ApiEvent::Deleted(id) => {
                self.tasks.retain(|t| t.id != id);
            }
        }
        self.clamp_selection();
    }

    /// Keep the selection inside the list after it shrinks.
    fn clamp_selection(&mut self) {
        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
