use chrono::{DateTime, Local};
use std::fmt::Write;
use std::time::{Duration, Instant};

/// Default refresh interval of the clock display
pub const DEFAULT_CLOCK_REFRESH_MS: u64 = 1000;

/// Default chrono format of the clock display
pub const DEFAULT_CLOCK_FORMAT: &str = "%H:%M:%S";

/// Live clock shown in the header, refreshed from the UI tick
#[derive(Debug, Clone)]
pub struct ClockDisplay {
    format: String,
    interval: Duration,
    text: String,
    last_refresh: Option<Instant>,
    running: bool,
}

impl ClockDisplay {
    pub fn new(format: impl Into<String>, interval: Duration) -> Self {
        Self {
            format: format.into(),
            interval,
            text: String::new(),
            last_refresh: None,
            running: false,
        }
    }

    /// Start refreshing and render the current time right away
    pub fn start(&mut self, now: Instant, local: DateTime<Local>) {
        self.running = true;
        self.refresh(now, local);
    }

    /// Refresh if the interval has elapsed. Returns true if the text was updated.
    pub fn tick(&mut self, now: Instant, local: DateTime<Local>) -> bool {
        if !self.running {
            return false;
        }
        let due = match self.last_refresh {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            self.refresh(now, local);
        }
        due
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_refresh = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn refresh(&mut self, now: Instant, local: DateTime<Local>) {
        let mut text = String::new();
        // chrono reports bad format strings as a fmt error
        if write!(text, "{}", local.format(&self.format)).is_err() {
            text = local.format(DEFAULT_CLOCK_FORMAT).to_string();
        }
        self.text = text;
        self.last_refresh = Some(now);
    }
}

impl Default for ClockDisplay {
    fn default() -> Self {
        Self::new(DEFAULT_CLOCK_FORMAT, Duration::from_millis(DEFAULT_CLOCK_REFRESH_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn local(h: u32, m: u32, s: u32) -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2026, 5, 20)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    #[test]
    fn test_start_renders_immediately() {
        let mut clock = ClockDisplay::default();
        assert_eq!(clock.text(), "");

        clock.start(Instant::now(), local(9, 5, 3));
        assert!(clock.is_running());
        assert_eq!(clock.text(), "09:05:03");
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut clock = ClockDisplay::default();
        let t0 = Instant::now();
        clock.start(t0, local(9, 0, 0));

        assert!(!clock.tick(t0 + Duration::from_millis(250), local(9, 0, 0)));
        assert_eq!(clock.text(), "09:00:00");

        assert!(clock.tick(t0 + Duration::from_millis(1000), local(9, 0, 1)));
        assert_eq!(clock.text(), "09:00:01");
    }

    #[test]
    fn test_stopped_clock_does_not_refresh() {
        let mut clock = ClockDisplay::default();
        let t0 = Instant::now();
        clock.start(t0, local(9, 0, 0));
        clock.stop();

        assert!(!clock.is_running());
        assert!(!clock.tick(t0 + Duration::from_secs(5), local(9, 0, 5)));
        assert_eq!(clock.text(), "09:00:00");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let mut clock = ClockDisplay::new("%Q", Duration::from_secs(1));
        clock.start(Instant::now(), local(18, 45, 12));
        assert_eq!(clock.text(), "18:45:12");
    }

    #[test]
    fn test_custom_format() {
        let mut clock = ClockDisplay::new("%H:%M", Duration::from_secs(1));
        clock.start(Instant::now(), local(18, 45, 12));
        assert_eq!(clock.text(), "18:45");
    }
}
