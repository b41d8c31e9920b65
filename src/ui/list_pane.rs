use crate::app::AppState;
use crate::domain::{alarm_label, status_badge, Task, UiMode};
use crate::notifications::Notifier;
use crate::ui::styles::{
    alarm_style, border_style, default_style, done_style, focused_border_style, hint_style,
    pending_style, selected_style, title_style,
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane<N: Notifier>(f: &mut Frame, app: &AppState<N>, area: Rect) {
    let now = Local::now();
    let focused = app.ui_mode == UiMode::Normal;

    let items: Vec<ListItem> = app
        .tasks
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let selected = focused && idx == app.selected_index;
            let fired = app.alarm_sync.has_fired(task.id);
            let line = create_task_line(task, app.use_emoji, selected, fired, now);
            let style = if selected {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        " Tasks ({} pending, {} done) ",
        app.tasks.pending_count(),
        app.tasks.completed_count()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title(Span::styled(title, title_style()));

    if items.is_empty() {
        let empty = List::new(vec![ListItem::new(Line::styled(
            "  Nothing to do. Type a task above and press Enter.",
            hint_style(),
        ))])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_index));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a task
/// Format: [ ] Buy milk   ⏰ 09:00 (in 1h 5m)   [c] complete [d] delete
fn create_task_line(
    task: &Task,
    use_emoji: bool,
    selected: bool,
    fired: bool,
    now: DateTime<Local>,
) -> Line<'static> {
    let mut spans = Vec::new();

    let done = task.status().is_completed();
    let badge_style = if done {
        done_style()
    } else {
        pending_style()
    };
    spans.push(Span::styled(format!("{} ", status_badge(task, use_emoji)), badge_style));

    if done {
        spans.push(Span::styled(task.text.clone(), done_style()));
    } else {
        spans.push(Span::raw(task.text.clone()));
    }

    if let Some(label) = alarm_label(task, now, use_emoji, fired) {
        spans.push(Span::raw("   ".to_string()));
        spans.push(Span::styled(label, alarm_style()));
    }

    // Row controls; completing is not offered once done
    if selected {
        spans.push(Span::raw("   ".to_string()));
        if !done {
            spans.push(Span::raw("[c] complete ".to_string()));
        }
        spans.push(Span::raw("[t] alarm [d] delete".to_string()));
    }

    Line::from(spans)
}
