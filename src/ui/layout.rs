use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the [Add] button including its border
pub const ADD_BUTTON_WIDTH: u16 = 9;

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub input_area: Rect,
    pub add_button_area: Rect,
    pub list_area: Rect,
    pub status_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Header: title and clock (1 row)
/// - Input bar: new-task field | [Add] button (3 rows)
/// - Task list (rest)
/// - Status line (1 row)
/// - Keybindings bar (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Input bar
            Constraint::Min(0),    // Task list
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Keybindings bar
        ])
        .split(area);

    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),                   // Input field
            Constraint::Length(ADD_BUTTON_WIDTH), // [Add]
        ])
        .split(rows[1]);

    MainLayout {
        header_area: rows[0],
        input_area: input_row[0],
        add_button_area: input_row[1],
        list_area: rows[2],
        status_area: rows[3],
        keybindings_area: rows[4],
    }
}

/// Create centered modal area (for the alarm editor)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
