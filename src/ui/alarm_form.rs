use crate::app::AppState;
use crate::notifications::Notifier;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the alarm editor for the selected task
pub fn render_alarm_form<N: Notifier>(f: &mut Frame, app: &AppState<N>, area: Rect) {
    let Some(editor) = &app.alarm_editor else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let task_text = app
        .tasks
        .get(editor.task_id)
        .map(|task| task.text.as_str())
        .unwrap_or("");

    let mut lines = Vec::new();
    lines.push(Line::from(vec![Span::raw("Task: "), Span::styled(task_text, modal_title_style())]));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Time (HH:MM) > "),
        Span::styled(&editor.buffer, modal_title_style()),
        Span::styled("█", modal_title_style()), // Cursor
    ]));
    lines.push(Line::raw(""));

    match &editor.error {
        Some(error) => lines.push(Line::styled(error.as_str(), error_style())),
        None => lines.push(Line::raw("")),
    }

    // Instructions
    lines.push(Line::raw("Enter to save  ·  empty clears  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Set Alarm ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
