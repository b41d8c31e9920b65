//! In-memory task list owned by the screen.
//!
//! Every task carries its own alarm slot, so tasks and alarms can never
//! drift out of alignment. `revision` changes whenever the content changes
//! and is what the alarm sync keys on.

use crate::domain::{AlarmTime, Task, TaskId};
use log::{debug, info};

#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    revision: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending task. Whitespace-only text is ignored.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("event=task_add status=ignored reason=empty_text");
            return None;
        }

        let task = Task::new(text.to_string());
        let id = task.id;
        self.tasks.push(task);
        self.bump();
        info!("event=task_add status=ok id={} count={}", id, self.tasks.len());
        Some(id)
    }

    /// Mark a task completed. No-op for unknown ids and already completed tasks.
    pub fn complete(&mut self, id: TaskId) -> bool {
        let changed = self
            .get_mut(id)
            .map(|task| task.mark_completed())
            .unwrap_or(false);
        if changed {
            self.bump();
            info!("event=task_complete status=ok id={}", id);
        }
        changed
    }

    /// Remove a task together with its alarm
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        self.bump();
        info!("event=task_delete status=ok id={} count={}", id, self.tasks.len());
        Some(removed)
    }

    /// Set or clear a task's alarm. No-op if the value is unchanged.
    pub fn set_alarm(&mut self, id: TaskId, alarm: Option<AlarmTime>) -> bool {
        let changed = self
            .get_mut(id)
            .map(|task| task.set_alarm(alarm))
            .unwrap_or(false);
        if changed {
            self.bump();
            match alarm {
                Some(time) => info!("event=alarm_set status=ok id={} time={}", id, time),
                None => info!("event=alarm_clear status=ok id={}", id),
            }
        }
        changed
    }

    /// Id of the task at a row position
    pub fn id_at(&self, index: usize) -> Option<TaskId> {
        self.tasks.get(index).map(|task| task.id)
    }

    pub fn complete_at(&mut self, index: usize) -> bool {
        match self.id_at(index) {
            Some(id) => self.complete(id),
            None => false,
        }
    }

    pub fn delete_at(&mut self, index: usize) -> Option<Task> {
        let id = self.id_at(index)?;
        self.delete(id)
    }

    pub fn set_alarm_at(&mut self, index: usize, alarm: Option<AlarmTime>) -> bool {
        match self.id_at(index) {
            Some(id) => self.set_alarm(id, alarm),
            None => false,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Tasks that carry an alarm, in list order
    pub fn alarms(&self) -> impl Iterator<Item = (&Task, AlarmTime)> {
        self.tasks
            .iter()
            .filter_map(|task| task.alarm.map(|alarm| (task, alarm)))
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
