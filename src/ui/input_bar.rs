use crate::app::AppState;
use crate::domain::UiMode;
use crate::notifications::Notifier;
use crate::ui::styles::{
    border_style, button_style, focused_border_style, hint_style, modal_title_style, title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the new-task field
pub fn render_input_bar<N: Notifier>(f: &mut Frame, app: &AppState<N>, area: Rect) {
    let focused = app.ui_mode == UiMode::Typing;

    let line = if app.input.is_empty() && !focused {
        Line::styled("New task", hint_style())
    } else {
        Line::from(vec![
            Span::raw(app.input.as_str()),
            if focused {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ])
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                focused_border_style()
            } else {
                border_style()
            })
            .title(Span::styled(" New Task ", title_style())),
    );

    f.render_widget(paragraph, area);
}

/// Render the clickable [Add] button
pub fn render_add_button(f: &mut Frame, area: Rect) {
    let button = Paragraph::new(Line::styled("Add", button_style()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style()));
    f.render_widget(button, area);
}
