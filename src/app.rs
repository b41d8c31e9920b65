use crate::alarm_sync::AlarmSync;
use crate::clock::ClockDisplay;
use crate::config::AppConfig;
use crate::domain::{parse_alarm_input, AlarmTime, TaskId, UiMode};
use crate::notifications::{self, LocalNotifier, Notifier};
use crate::store::TaskList;
use chrono::{DateTime, Local};
use log::info;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// How many fired alarms are kept for the banner
const MAX_FIRED: usize = 5;

/// Longest a status message stays up
const MAX_STATUS_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Alarm editor state for the selected task
#[derive(Debug, Clone)]
pub struct AlarmEditorState {
    pub task_id: TaskId,
    pub buffer: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient message shown in the status line
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

/// An alarm that went off while the screen was mounted
#[derive(Debug, Clone)]
pub struct FiredAlarm {
    pub text: String,
    pub trigger: AlarmTime,
}

/// The to-do screen: task list, input field, clock and alarm scheduling
pub struct AppState<N: Notifier = LocalNotifier> {
    pub tasks: TaskList,
    pub input: String,
    pub alarm_editor: Option<AlarmEditorState>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub clock: ClockDisplay,
    pub alarm_sync: AlarmSync,
    pub notifier: N,
    pub notification_title: String,
    pub desktop_notifications: bool,
    pub use_emoji: bool,
    pub status: Option<StatusMessage>,
    pub status_timeout: Duration,
    pub fired: Vec<FiredAlarm>,
    pub mounted: bool,
    /// Screen area of the [Add] button, recorded by the last render
    pub add_button_area: Option<Rect>,
}

impl<N: Notifier> AppState<N> {
    pub fn new(config: &AppConfig, notifier: N) -> Self {
        Self {
            tasks: TaskList::new(),
            input: String::new(),
            alarm_editor: None,
            selected_index: 0,
            ui_mode: UiMode::Typing,
            clock: ClockDisplay::new(
                config.clock_format.clone(),
                Duration::from_millis(config.clock_refresh_ms.max(1)),
            ),
            alarm_sync: AlarmSync::new(),
            notifier,
            notification_title: config.notification_title.clone(),
            desktop_notifications: config.desktop_notifications,
            use_emoji: config.use_emoji,
            status: None,
            status_timeout: Duration::from_secs(config.status_timeout_secs).min(MAX_STATUS_TIMEOUT),
            fired: Vec::new(),
            mounted: false,
            add_button_area: None,
        }
    }

    /// Start the clock and schedule alarms for the current list
    pub fn mount(&mut self, now: Instant, local: DateTime<Local>) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.clock.start(now, local);
        self.sync_alarms();
        info!("event=screen_mount status=ok");
    }

    /// Stop the clock and cancel every notification this screen scheduled
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.clock.stop();
        self.alarm_sync.teardown(&mut self.notifier);
        info!(
            "event=screen_unmount status=ok pending_notifications={}",
            self.notifier.pending_count()
        );
    }

    /// Cancel and reschedule notifications if the task list changed
    pub fn sync_alarms(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        self.alarm_sync
            .reconcile(&self.tasks, &mut self.notifier, &self.notification_title)
    }

    /// Advance the clock, keep alarms in sync and deliver due notifications
    pub fn tick(&mut self, now: Instant, local: DateTime<Local>) {
        if !self.mounted {
            return;
        }
        self.clock.tick(now, local);
        self.sync_alarms();

        for (id, request) in self.notifier.take_due(local) {
            self.alarm_sync.mark_fired(id);
            if self.desktop_notifications {
                notifications::deliver_desktop(&request);
            }
            self.fired.push(FiredAlarm {
                text: request.body,
                trigger: request.trigger,
            });
        }
        if self.fired.len() > MAX_FIRED {
            let excess = self.fired.len() - MAX_FIRED;
            self.fired.drain(..excess);
        }

        if let Some(status) = &self.status {
            if now >= status.expires_at {
                self.status = None;
            }
        }
    }

    /// Most recent fired alarm, for the banner
    pub fn latest_fired(&self) -> Option<&FiredAlarm> {
        self.fired.last()
    }

    pub fn dismiss_fired(&mut self) {
        self.fired.clear();
    }

    // New task input

    pub fn focus_input(&mut self) {
        self.ui_mode = UiMode::Typing;
    }

    pub fn blur_input(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Add a task from the input field (Enter or the [Add] button)
    pub fn submit_new_task(&mut self) -> Option<TaskId> {
        let id = self.tasks.add(&self.input);
        // Whitespace-only text is dropped silently either way
        self.input.clear();
        if id.is_some() {
            self.selected_index = self.tasks.len() - 1;
        }
        id
    }

    // Selection

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.tasks.id_at(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.tasks.len() {
            self.selected_index += 1;
        }
    }

    // Row actions

    pub fn complete_selected(&mut self) -> bool {
        self.tasks.complete_at(self.selected_index)
    }

    pub fn delete_selected(&mut self) -> bool {
        let removed = self.tasks.delete_at(self.selected_index).is_some();
        self.clamp_selection();
        removed
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.tasks.len() {
            self.selected_index = self.tasks.len().saturating_sub(1);
        }
    }

    // Alarm editor

    /// Open the alarm editor for the selected task, prefilled with its alarm
    pub fn start_edit_alarm(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let buffer = self
            .tasks
            .get(id)
            .and_then(|task| task.alarm)
            .map(|alarm| alarm.to_string())
            .unwrap_or_default();
        self.alarm_editor = Some(AlarmEditorState {
            task_id: id,
            buffer,
            error: None,
        });
        self.ui_mode = UiMode::EditingAlarm;
    }

    /// Digits and ':' only
    pub fn alarm_input_add_char(&mut self, c: char) {
        if let Some(editor) = &mut self.alarm_editor {
            if (c.is_ascii_digit() || c == ':') && editor.buffer.len() < 5 {
                editor.buffer.push(c);
                editor.error = None;
            }
        }
    }

    pub fn alarm_input_backspace(&mut self) {
        if let Some(editor) = &mut self.alarm_editor {
            editor.buffer.pop();
            editor.error = None;
        }
    }

    /// Validate the editor buffer and store it. Empty clears the alarm.
    /// A malformed time keeps the editor open with an error.
    pub fn submit_alarm(&mut self) {
        let Some(editor) = &mut self.alarm_editor else {
            return;
        };

        match parse_alarm_input(&editor.buffer) {
            Ok(alarm) => {
                let task_id = editor.task_id;
                self.alarm_editor = None;
                self.ui_mode = UiMode::Normal;
                // The task may have been deleted while the editor was open
                if self.tasks.get(task_id).is_none() {
                    return;
                }
                self.tasks.set_alarm(task_id, alarm);
                let message = match alarm {
                    Some(time) => format!("Alarm set for {}", time),
                    None => "Alarm cleared".to_string(),
                };
                self.set_status(message, StatusKind::Info);
            }
            Err(e) => {
                let message = format!("Invalid alarm time: {}", e);
                editor.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    pub fn cancel_alarm_input(&mut self) {
        self.alarm_editor = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn set_status(&mut self, text: String, kind: StatusKind) {
        let now = Instant::now();
        let expires_at = now
            .checked_add(self.status_timeout)
            .unwrap_or(now + MAX_STATUS_TIMEOUT);
        self.status = Some(StatusMessage {
            text,
            kind,
            expires_at,
        });
    }
}
