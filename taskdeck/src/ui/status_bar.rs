//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::state::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.editing_id.is_some() {
        "Enter: save | Esc: cancel edit"
    } else {
        match app.focus {
            PanelFocus::Input => "Enter: add | Tab: switch panel | Esc: quit",
            PanelFocus::List => {
                "↑↓/jk: navigate | Space: toggle | e: edit | d: delete | r: refresh | Esc: quit"
            }
        }
    };

    let done = app.tasks.iter().filter(|t| t.completed).count();
    let counts = format!("{done}/{} done", app.tasks.len());

    let status_line = Line::from(vec![
        Span::styled("Taskdeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::raw(counts),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
