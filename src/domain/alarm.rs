use crate::error::AlarmParseError;
use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use std::fmt;
use std::str::FromStr;

/// Time of day at which a task alarm fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
}

impl AlarmTime {
    /// Build an alarm time, rejecting out-of-range values
    pub fn new(hour: u32, minute: u32) -> Result<Self, AlarmParseError> {
        if hour > 23 {
            return Err(AlarmParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(AlarmParseError::MinuteOutOfRange(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Wall-clock time as a chrono value
    pub fn as_naive_time(&self) -> NaiveTime {
        // Range is checked on construction
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0).unwrap_or(NaiveTime::MIN)
    }

    /// First local datetime strictly after `after` whose wall-clock time is this alarm.
    ///
    /// Days where the time does not exist (DST gap) are skipped.
    pub fn next_occurrence(&self, after: DateTime<Local>) -> DateTime<Local> {
        let time = self.as_naive_time();
        let mut date = after.date_naive();

        // At most one DST gap can hide a wall-clock time, so two days ahead always resolves
        for _ in 0..3 {
            if let Some(candidate) = Local.from_local_datetime(&date.and_time(time)).earliest() {
                if candidate > after {
                    return candidate;
                }
            }
            date = date.succ_opt().unwrap_or(date);
        }

        after + Duration::days(1)
    }

    /// Time remaining until the next occurrence
    pub fn until_next(&self, now: DateTime<Local>) -> Duration {
        self.next_occurrence(now).signed_duration_since(now)
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for AlarmTime {
    type Err = AlarmParseError;

    /// Parse "HH:MM" (24h). Each part may have one or two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AlarmParseError::Empty);
        }

        let mut parts = s.split(':');
        let hour_part = parts.next().unwrap_or_default().trim();
        let minute_part = parts
            .next()
            .ok_or(AlarmParseError::MissingSeparator)?
            .trim();
        if parts.next().is_some() {
            return Err(AlarmParseError::TooManyParts);
        }

        let hour = parse_component(hour_part).ok_or_else(|| AlarmParseError::InvalidHour(hour_part.to_string()))?;
        let minute =
            parse_component(minute_part).ok_or_else(|| AlarmParseError::InvalidMinute(minute_part.to_string()))?;

        Self::new(hour, minute)
    }
}

/// One or two ASCII digits
fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a raw editor buffer: empty means "no alarm"
pub fn parse_alarm_input(raw: &str) -> Result<Option<AlarmTime>, AlarmParseError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}
