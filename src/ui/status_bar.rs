use crate::app::{AppState, StatusKind};
use crate::notifications::Notifier;
use crate::ui::styles::{banner_style, clock_style, error_style, info_style, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the header: title on the left, live clock on the right
pub fn render_header<N: Notifier>(f: &mut Frame, app: &AppState<N>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(area);

    let icon = if app.use_emoji { "📝 " } else { "" };
    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}To-do list", icon),
        title_style(),
    )));
    f.render_widget(title, columns[0]);

    let clock = Paragraph::new(Line::from(Span::styled(
        format!("{} ", app.clock.text()),
        clock_style(),
    )))
    .alignment(Alignment::Right);
    f.render_widget(clock, columns[1]);
}

/// Render the status line. A fired alarm takes precedence over status messages.
pub fn render_status_line<N: Notifier>(f: &mut Frame, app: &AppState<N>, area: Rect) {
    let line = if let Some(fired) = app.latest_fired() {
        let icon = if app.use_emoji { "⏰" } else { "!" };
        Line::from(Span::styled(
            format!(
                " {} {}  {}  (x to dismiss)",
                icon, fired.trigger, fired.text
            ),
            banner_style(),
        ))
    } else if let Some(status) = &app.status {
        let style = match status.kind {
            StatusKind::Info => info_style(),
            StatusKind::Error => error_style(),
        };
        Line::from(Span::styled(format!(" {}", status.text), style))
    } else {
        Line::raw("")
    };

    f.render_widget(Paragraph::new(line), area);
}
