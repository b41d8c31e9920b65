use crate::app::AppState;
use crate::domain::UiMode;
use crate::notifications::Notifier;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key<N: Notifier>(app: &mut AppState<N>, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Typing => handle_typing_mode(app, key),
        UiMode::EditingAlarm => handle_alarm_mode(app, key),
    }
}

/// Handle keys while the task list has focus
fn handle_normal_mode<N: Notifier>(app: &mut AppState<N>, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Focus the new-task field
        KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Tab => {
            app.focus_input();
            Ok(false)
        }

        // Complete
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Enter => {
            app.complete_selected();
            Ok(false)
        }

        // Delete
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Edit alarm
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.start_edit_alarm();
            Ok(false)
        }

        // Dismiss fired alarm banner
        KeyCode::Char('x') | KeyCode::Char('X') => {
            app.dismiss_fired();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while typing a new task
fn handle_typing_mode<N: Notifier>(app: &mut AppState<N>, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit, same as clicking [Add]
        KeyCode::Enter => {
            app.submit_new_task();
            Ok(false)
        }

        // Back to the list
        KeyCode::Esc | KeyCode::Tab | KeyCode::Down => {
            app.blur_input();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in the alarm editor
fn handle_alarm_mode<N: Notifier>(app: &mut AppState<N>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_alarm();
            Ok(false)
        }

        KeyCode::Esc => {
            app.cancel_alarm_input();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.alarm_input_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.alarm_input_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle mouse events. A left click on [Add] submits the input field.
pub fn handle_mouse<N: Notifier>(app: &mut AppState<N>, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.ui_mode == UiMode::EditingAlarm {
        return;
    }
    if let Some(area) = app.add_button_area {
        if hit(area, mouse.column, mouse.row) {
            app.submit_new_task();
        }
    }
}

fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::TaskStatus;
    use crate::notifications::LocalNotifier;
    use chrono::Local;
    use crossterm::event::KeyEventKind;
    use std::time::Instant;

    fn create_test_app() -> AppState {
        let config = AppConfig {
            desktop_notifications: false,
            ..Default::default()
        };
        let mut app = AppState::new(&config, LocalNotifier::new());
        app.mount(Instant::now(), Local::now());
        app
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_enter_adds_task() {
        let mut app = create_test_app();
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].text, "Buy milk");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_add_button_click_adds_task() {
        let mut app = create_test_app();
        app.add_button_area = Some(Rect::new(70, 3, 7, 1));
        type_str(&mut app, "Walk dog");

        // Outside the button
        handle_mouse(&mut app, click(10, 3));
        assert_eq!(app.tasks.len(), 0);

        handle_mouse(&mut app, click(72, 3));
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].text, "Walk dog");
    }

    #[test]
    fn test_typing_q_does_not_quit() {
        let mut app = create_test_app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input, "q");
    }

    #[test]
    fn test_normal_mode_row_actions() {
        let mut app = create_test_app();
        type_str(&mut app, "A");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "B");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.tasks.tasks()[0].status(), TaskStatus::Completed);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].text, "B");
    }

    #[test]
    fn test_alarm_editor_keys() {
        let mut app = create_test_app();
        type_str(&mut app, "A");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.ui_mode, UiMode::EditingAlarm);
        type_str(&mut app, "08:15");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks.tasks()[0].alarm, Some("08:15".parse().unwrap()));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));

        let mut app = create_test_app();
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }
}
