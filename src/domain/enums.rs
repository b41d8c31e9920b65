/// Lifecycle status of a task. Pending -> Completed is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// UI mode for the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Typing,       // Focus is in the new-task input field
    EditingAlarm, // Alarm editor modal is open
}
