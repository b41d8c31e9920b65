/// Notification scheduling for task alarms
///
/// `Notifier` is the seam to whatever actually delivers notifications.
/// `LocalNotifier` keeps one-time triggers in memory and hands them back
/// once the wall clock reaches them.
use crate::domain::AlarmTime;
use crate::error::NotifyError;
use chrono::{DateTime, Local};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fmt;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Handle returned by `Notifier::schedule`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A one-time notification to fire at a time of day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub trigger: AlarmTime,
}

pub trait Notifier {
    fn schedule(&mut self, request: NotificationRequest) -> Result<NotificationId, NotifyError>;

    fn cancel(&mut self, id: NotificationId) -> Result<(), NotifyError>;

    /// Number of notifications scheduled and not yet fired or cancelled
    fn pending_count(&self) -> usize;

    /// Remove and return every notification whose trigger has been reached,
    /// together with the handle it was scheduled under
    fn take_due(&mut self, now: DateTime<Local>) -> Vec<(NotificationId, NotificationRequest)>;
}

#[derive(Debug, Clone)]
struct Scheduled {
    request: NotificationRequest,
    fire_at: DateTime<Local>,
}

/// In-process scheduler driven by the UI tick
#[derive(Debug, Default)]
pub struct LocalNotifier {
    next_id: u64,
    scheduled: BTreeMap<NotificationId, Scheduled>,
}

impl LocalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule relative to an explicit "now"
    pub fn schedule_at(&mut self, request: NotificationRequest, now: DateTime<Local>) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId::new(self.next_id);
        let fire_at = request.trigger.next_occurrence(now);
        debug!(
            "event=notification_schedule id={} trigger={} fire_at={}",
            id,
            request.trigger,
            fire_at.to_rfc3339()
        );
        self.scheduled.insert(id, Scheduled { request, fire_at });
        id
    }
}

impl Notifier for LocalNotifier {
    fn schedule(&mut self, request: NotificationRequest) -> Result<NotificationId, NotifyError> {
        Ok(self.schedule_at(request, Local::now()))
    }

    fn cancel(&mut self, id: NotificationId) -> Result<(), NotifyError> {
        self.scheduled
            .remove(&id)
            .map(|_| ())
            .ok_or(NotifyError::UnknownHandle(id))
    }

    fn pending_count(&self) -> usize {
        self.scheduled.len()
    }

    fn take_due(&mut self, now: DateTime<Local>) -> Vec<(NotificationId, NotificationRequest)> {
        let due: Vec<NotificationId> = self
            .scheduled
            .iter()
            .filter(|(_, entry)| entry.fire_at <= now)
            .map(|(id, _)| *id)
            .collect();

        due.into_iter()
            .filter_map(|id| self.scheduled.remove(&id).map(|entry| (id, entry)))
            .map(|(id, entry)| {
                info!(
                    "event=notification_fire id={} trigger={} body_len={}",
                    id,
                    entry.request.trigger,
                    entry.request.body.len()
                );
                (id, entry.request)
            })
            .collect()
    }
}

/// Show a fired alarm as a desktop notification.
/// Currently only implemented on macOS.
pub fn deliver_desktop(request: &NotificationRequest) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            "display notification {} with title {}",
            applescript_string(&request.body),
            applescript_string(&request.title)
        );

        // Not waited on; the UI loop keeps running while osascript shows it
        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).spawn() {
            log::warn!("event=notification_deliver status=error error={}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = request;
    }
}

/// Quote text as an AppleScript string literal
#[cfg(any(target_os = "macos", test))]
fn applescript_string(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
