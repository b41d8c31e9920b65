use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the current mode
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("i new task   "),
            Span::raw("c complete   "),
            Span::raw("d delete   "),
            Span::raw("t alarm   "),
            Span::raw("x dismiss   "),
            Span::raw("q quit"),
        ]),
        UiMode::Typing => Line::from(vec![
            Span::raw(" Enter / [Add] add task   "),
            Span::raw("Esc/Tab task list   "),
            Span::raw("Ctrl+C quit"),
        ]),
        UiMode::EditingAlarm => Line::from(vec![
            Span::raw(" Enter save   "),
            Span::raw("Esc cancel"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
