pub mod alarm;
pub mod enums;
pub mod task;
pub mod views;

pub use alarm::{parse_alarm_input, AlarmTime};
pub use enums::{TaskStatus, UiMode};
pub use task::{Task, TaskId};
pub use views::{alarm_label, format_countdown, status_badge};
