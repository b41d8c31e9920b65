//! Keeps scheduled notifications in step with the task list.
//!
//! Whenever the list revision changes, every handle scheduled by the
//! previous pass is cancelled before any new one is requested. Handles are
//! tracked so unmount can cancel all of them. A handle that fired is no
//! longer tracked, and its task is reported as fired until the next pass
//! arms it again.

use crate::domain::TaskId;
use crate::notifications::{NotificationId, NotificationRequest, Notifier};
use crate::store::TaskList;
use log::{debug, info, warn};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct AlarmSync {
    handles: Vec<(TaskId, NotificationId)>,
    fired: HashSet<TaskId>,
    last_revision: Option<u64>,
}

impl AlarmSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reschedule if the task list changed since the last pass.
    /// Returns true when a pass ran.
    pub fn reconcile<N: Notifier + ?Sized>(&mut self, tasks: &TaskList, notifier: &mut N, title: &str) -> bool {
        if self.last_revision == Some(tasks.revision()) {
            return false;
        }

        let cancelled = self.cancel_all(notifier);
        self.fired.clear();

        for (task, trigger) in tasks.alarms() {
            let request = NotificationRequest {
                title: title.to_string(),
                body: task.text.clone(),
                trigger,
            };
            match notifier.schedule(request) {
                Ok(id) => self.handles.push((task.id, id)),
                Err(e) => warn!(
                    "event=alarm_schedule status=error task={} trigger={} error={}",
                    task.id, trigger, e
                ),
            }
        }

        self.last_revision = Some(tasks.revision());
        info!(
            "event=alarm_reconcile revision={} cancelled={} scheduled={}",
            tasks.revision(),
            cancelled,
            self.handles.len()
        );
        true
    }

    /// Cancel everything this sync scheduled (screen unmount)
    pub fn teardown<N: Notifier + ?Sized>(&mut self, notifier: &mut N) {
        let cancelled = self.cancel_all(notifier);
        self.fired.clear();
        self.last_revision = None;
        info!("event=alarm_teardown cancelled={}", cancelled);
    }

    pub fn active_handles(&self) -> usize {
        self.handles.len()
    }

    /// Stop tracking a handle the notifier reported as fired.
    /// Returns the task it belonged to, if it was ours.
    pub fn mark_fired(&mut self, id: NotificationId) -> Option<TaskId> {
        let pos = self.handles.iter().position(|(_, handle)| *handle == id)?;
        let (task_id, _) = self.handles.remove(pos);
        self.fired.insert(task_id);
        Some(task_id)
    }

    /// Whether the task's alarm fired and has not been rearmed since
    pub fn has_fired(&self, task_id: TaskId) -> bool {
        self.fired.contains(&task_id)
    }

    fn cancel_all<N: Notifier + ?Sized>(&mut self, notifier: &mut N) -> usize {
        let mut cancelled = 0;
        for (_, id) in self.handles.drain(..) {
            match notifier.cancel(id) {
                Ok(()) => cancelled += 1,
                // The backend may have dropped it already
                Err(e) => debug!("event=alarm_cancel status=skipped id={} error={}", id, e),
            }
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use chrono::{DateTime, Local};
    use std::collections::BTreeSet;

    /// Records every call; the live set is what a real backend would hold
    #[derive(Default)]
    struct RecordingNotifier {
        next: u64,
        live: BTreeSet<NotificationId>,
        log: Vec<String>,
        requests: Vec<NotificationRequest>,
        reject: bool,
    }

    impl Notifier for RecordingNotifier {
        fn schedule(&mut self, request: NotificationRequest) -> Result<NotificationId, NotifyError> {
            if self.reject {
                return Err(NotifyError::Rejected("disabled".to_string()));
            }
            self.next += 1;
            let id = NotificationId::new(self.next);
            self.live.insert(id);
            self.log.push(format!("schedule {}", request.body));
            self.requests.push(request);
            Ok(id)
        }

        fn cancel(&mut self, id: NotificationId) -> Result<(), NotifyError> {
            self.log.push("cancel".to_string());
            if self.live.remove(&id) {
                Ok(())
            } else {
                Err(NotifyError::UnknownHandle(id))
            }
        }

        fn pending_count(&self) -> usize {
            self.live.len()
        }

        fn take_due(&mut self, _now: DateTime<Local>) -> Vec<(NotificationId, NotificationRequest)> {
            Vec::new()
        }
    }

    fn alarm(s: &str) -> Option<crate::domain::AlarmTime> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_schedules_one_per_alarm() {
        let mut tasks = TaskList::new();
        tasks.add("Buy milk");
        tasks.add("Walk dog");
        tasks.set_alarm_at(1, alarm("18:30"));
        let mut notifier = RecordingNotifier::default();
        let mut sync = AlarmSync::new();

        assert!(sync.reconcile(&tasks, &mut notifier, "Alarm!"));

        assert_eq!(notifier.pending_count(), 1);
        assert_eq!(sync.active_handles(), 1);
        let request = &notifier.requests[0];
        assert_eq!(request.body, "Walk dog");
        assert_eq!(request.title, "Alarm!");
        assert_eq!(request.trigger.to_string(), "18:30");
    }

    #[test]
    fn test_unchanged_revision_skips_pass() {
        let mut tasks = TaskList::new();
        tasks.add("A");
        tasks.set_alarm_at(0, alarm("09:00"));
        let mut notifier = RecordingNotifier::default();
        let mut sync = AlarmSync::new();

        assert!(sync.reconcile(&tasks, &mut notifier, "Alarm!"));
        assert!(!sync.reconcile(&tasks, &mut notifier, "Alarm!"));
        assert_eq!(notifier.log.len(), 1);
    }

    #[test]
    fn test_cancel_runs_before_schedule() {
        let mut tasks = TaskList::new();
        tasks.add("A");
        tasks.set_alarm_at(0, alarm("09:00"));
        let mut notifier = RecordingNotifier::default();
        let mut sync = AlarmSync::new();
        sync.reconcile(&tasks, &mut notifier, "Alarm!");

        tasks.add("B");
        sync.reconcile(&tasks, &mut notifier, "Alarm!");

        assert_eq!(notifier.log, vec!["schedule A", "cancel", "schedule A"]);
        assert_eq!(notifier.pending_count(), 1);
    }

    #[test]
    fn test_same_alarm_twice_leaves_one_active() {
        let mut tasks = TaskList::new();
        let id = tasks.add("A").unwrap();
        let mut notifier = RecordingNotifier::default();
        let mut sync = AlarmSync::new();

        tasks.set_alarm(id, alarm("09:00"));
        sync.reconcile(&tasks, &mut notifier, "Alarm!");
        tasks.set_alarm(id, alarm("09:00"));
        sync.reconcile(&tasks, &mut notifier, "Alarm!");

        assert_eq!(notifier.pending_count(), 1);
        assert_eq!(sync.active_handles(), 1);
    }

    #[test]
    fn test_delete_cancels_its_notification() {
        let mut tasks = TaskList::new();
        tasks.add("A");
        tasks.add("B");
        tasks.set_alarm_at(1, alarm("09:00"));
        let mut notifier = RecordingNotifier::default();
        let mut sync = AlarmSync::new();
        sync.reconcile(&tasks, &mut notifier, "Alarm!");

        tasks.delete_at(1);
        sync.reconcile(&tasks, &mut notifier, "Alarm!");

        assert_eq!(notifier.pending_count(), 0);
        assert_eq!(sync.active_handles(), 0);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut tasks = TaskList::new();
        tasks.add("A");
        tasks.add("B");
        tasks.set_alarm_at(0, alarm("09:00"));
        tasks.set_alarm_at(1, alarm("10:00"));
        let mut notifier = RecordingNotifier::default();
        let mut sync = AlarmSync::new();
        sync.reconcile(&tasks, &mut notifier, "Alarm!");
        assert_eq!(notifier.pending_count(), 2);

        sync.teardown(&mut notifier);

        assert_eq!(notifier.pending_count(), 0);
        assert_eq!(sync.active_handles(), 0);
        // A later pass on the same revision schedules again
        assert!(sync.reconcile(&tasks, &mut notifier, "Alarm!"));
    }

    #[test]
    fn test_rejected_schedule_is_not_tracked() {
        let mut tasks = TaskList::new();
        tasks.add("A");
        tasks.set_alarm_at(0, alarm("09:00"));
        let mut notifier = RecordingNotifier {
            reject: true,
            ..Default::default()
        };
        let mut sync = AlarmSync::new();

        assert!(sync.reconcile(&tasks, &mut notifier, "Alarm!"));
        assert_eq!(sync.active_handles(), 0);
    }

    #[test]
    fn test_fired_handle_is_untracked_until_next_pass() {
        let mut tasks = TaskList::new();
        let id = tasks.add("A").unwrap();
        tasks.set_alarm(id, alarm("09:00"));
        let mut notifier = RecordingNotifier::default();
        let mut sync = AlarmSync::new();
        sync.reconcile(&tasks, &mut notifier, "Alarm!");

        let handle = *notifier.live.iter().next().unwrap();
        notifier.live.remove(&handle);
        assert_eq!(sync.mark_fired(handle), Some(id));
        assert!(sync.has_fired(id));
        assert_eq!(sync.active_handles(), 0);
        assert_eq!(sync.mark_fired(handle), None);

        tasks.add("B");
        sync.reconcile(&tasks, &mut notifier, "Alarm!");
        assert!(!sync.has_fired(id));
        assert_eq!(sync.active_handles(), 1);
        assert_eq!(notifier.pending_count(), 1);
    }
}
