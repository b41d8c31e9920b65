use crate::notifications::NotificationId;
use thiserror::Error;

/// Why a raw "HH:MM" string was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlarmParseError {
    #[error("alarm time is empty")]
    Empty,
    #[error("expected HH:MM, missing ':'")]
    MissingSeparator,
    #[error("expected HH:MM, found more than one ':'")]
    TooManyParts,
    #[error("invalid hour `{0}`")]
    InvalidHour(String),
    #[error("invalid minute `{0}`")]
    InvalidMinute(String),
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),
    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u32),
}

/// Failures reported by a notification backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("no scheduled notification with handle {0}")]
    UnknownHandle(NotificationId),
    #[error("notification rejected: {0}")]
    Rejected(String),
}
