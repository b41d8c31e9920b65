use super::task::Task;
use chrono::{DateTime, Duration, Local};

/// Checkbox glyph for a task row
pub fn status_badge(task: &Task, use_emoji: bool) -> &'static str {
    match (task.completed, use_emoji) {
        (true, true) => "✅",
        (false, true) => "⬜",
        (true, false) => "[x]",
        (false, false) => "[ ]",
    }
}

/// Alarm column text, e.g. "⏰ 09:00 (in 1h 5m)", or "⏰ 09:00 (fired)"
/// once a one-time alarm went off and has not been rearmed
pub fn alarm_label(task: &Task, now: DateTime<Local>, use_emoji: bool, fired: bool) -> Option<String> {
    let alarm = task.alarm?;
    let icon = if use_emoji { "⏰" } else { "@" };
    if fired {
        return Some(format!("{} {} (fired)", icon, alarm));
    }
    Some(format!(
        "{} {} (in {})",
        icon,
        alarm,
        format_countdown(alarm.until_next(now))
    ))
}

/// Format a countdown as "Xh Ym", "Ym" or "<1m"
pub fn format_countdown(remaining: Duration) -> String {
    let total_minutes = remaining.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if total_minutes <= 0 {
        "<1m".to_string()
    } else if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}
