pub mod alarm_form;
pub mod input_bar;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod status_bar;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use crate::notifications::Notifier;
use alarm_form::render_alarm_form;
use input_bar::{render_add_button, render_input_bar};
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;
use status_bar::{render_header, render_status_line};

/// Main render function - draws the entire UI
pub fn render<N: Notifier>(f: &mut Frame, app: &mut AppState<N>) {
    let size = f.size();
    let layout = create_layout(size);

    // Remember where [Add] is so mouse clicks can hit it
    app.add_button_area = Some(layout.add_button_area);

    render_header(f, app, layout.header_area);
    render_input_bar(f, app, layout.input_area);
    render_add_button(f, layout.add_button_area);
    render_list_pane(f, app, layout.list_area);
    render_status_line(f, app, layout.status_area);
    render_keybindings(f, app.ui_mode, layout.keybindings_area);

    // Render alarm editor if active
    if app.ui_mode == UiMode::EditingAlarm {
        render_alarm_form(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::notifications::LocalNotifier;
    use chrono::Local;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::time::Instant;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn create_test_app() -> AppState {
        let config = AppConfig {
            desktop_notifications: false,
            use_emoji: false,
            ..Default::default()
        };
        let mut app = AppState::new(&config, LocalNotifier::new());
        app.mount(Instant::now(), Local::now());
        app
    }

    #[test]
    fn test_render_tasks_and_records_button_area() {
        let mut app = create_test_app();
        app.input = "Buy milk".to_string();
        app.submit_new_task();
        app.input = "Walk dog".to_string();
        app.submit_new_task();
        app.blur_input();

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("To-do list"));
        assert!(text.contains("[ ] Buy milk"));
        assert!(text.contains("[ ] Walk dog"));
        assert!(text.contains("Add"));
        assert!(text.contains(app.clock.text()));

        let button = app.add_button_area.unwrap();
        assert_eq!(button.x + button.width, 100);
    }

    #[test]
    fn test_render_alarm_editor() {
        let mut app = create_test_app();
        app.input = "Buy milk".to_string();
        app.submit_new_task();
        app.blur_input();
        app.start_edit_alarm();
        app.alarm_input_add_char('0');
        app.alarm_input_add_char('9');

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Set Alarm"));
        assert!(text.contains("Time (HH:MM) > 09"));
    }
}
