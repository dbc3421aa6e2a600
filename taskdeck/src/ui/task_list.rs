//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::theme;
use crate::state::{App, PanelFocus};

/// Render the task list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = if app.tasks.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No tasks yet. Type one above and press Enter.",
            theme::dimmed(),
        )))]
    } else {
        app.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let checkbox = if task.completed { "[✓]" } else { "[ ]" };
                let text_style = if app.focus == PanelFocus::List && i == app.selected {
                    theme::selected()
                } else if task.completed {
                    theme::completed()
                } else {
                    theme::normal()
                };

                let line = Line::from(vec![
                    Span::styled(checkbox, theme::normal()),
                    Span::raw(" "),
                    Span::styled(task.text.as_str(), text_style),
                ]);

                ListItem::new(line)
            })
            .collect()
    };

    let border_style = if app.focus == PanelFocus::List {
        theme::highlighted()
    } else {
        theme::normal()
    };

    let block = Block::default()
        .title(Span::styled("Tasks", theme::panel_title(theme::LIST_TITLE)))
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
