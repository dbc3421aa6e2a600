//! Input bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::state::{App, PanelFocus};

/// Render the input bar at the top of the screen.
///
/// Shows the draft for a new task, or the edit buffer when a task edit
/// is in progress. The border lights up when the bar has keyboard focus.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.editing_id.is_some();

    let (title, text) = if editing {
        ("Edit task", app.editing_text.as_str())
    } else {
        ("New task", app.draft_text.as_str())
    };

    let focused = editing || app.focus == PanelFocus::Input;
    let border_style = if focused {
        theme::highlighted()
    } else {
        theme::normal()
    };

    let mut spans = vec![Span::styled(text, theme::normal())];
    if focused {
        spans.push(Span::styled("█", theme::input_cursor()));
    }

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::INPUT_TITLE)))
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
