use super::alarm::AlarmTime;
use super::enums::TaskStatus;
use chrono::{DateTime, Local};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a task for the lifetime of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A to-do entry together with its optional alarm
#[derive(Debug, Clone)]
pub struct Task {
    /// Unique ID used by every operation instead of the row position
    pub id: TaskId,
    /// Task label, fixed at creation
    pub text: String,
    /// Whether the task was completed
    pub completed: bool,
    /// Time of day to notify at, if any
    pub alarm: Option<AlarmTime>,
    /// When the task was created
    pub created_at: DateTime<Local>,
    /// When the task was completed (if done)
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            id: TaskId::new(),
            text,
            completed: false,
            alarm: None,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    pub fn status(&self) -> TaskStatus {
        if self.completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        }
    }

    /// Mark as completed. Returns false if it already was.
    pub fn mark_completed(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_at = Some(Local::now());
        true
    }

    /// Replace the alarm. Returns false if the value did not change.
    pub fn set_alarm(&mut self, alarm: Option<AlarmTime>) -> bool {
        if self.alarm == alarm {
            return false;
        }
        self.alarm = alarm;
        true
    }
}
