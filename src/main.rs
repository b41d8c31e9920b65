mod alarm_sync;
mod app;
mod clock;
mod config;
mod domain;
mod error;
mod input;
mod logging;
mod notifications;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use config::{default_config_path, load_config, AppConfig};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::AlarmTime;
use notifications::{LocalNotifier, Notifier};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "alarm-todo")]
#[command(about = "A terminal to-do list with per-task time-of-day alarms", long_about = None)]
struct Cli {
    /// Config file path. Defaults to ~/.config/alarm-todo/config.json
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// chrono format string for the clock, e.g. "%H:%M"
    #[arg(long, global = true)]
    clock_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration as JSON
    Config,
    /// Check an alarm time (HH:MM) and show when it would fire next
    CheckAlarm {
        /// Time of day, 24h HH:MM
        time: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Some(Commands::Config) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Some(Commands::CheckAlarm { time }) => {
            println!("{}", check_alarm(&time, Local::now())?);
            Ok(())
        }
        None => {
            // Run the normal TUI application
            run_tui(&config)
        }
    }
}

/// Normalized alarm time and its next occurrence after `now`
fn check_alarm(time: &str, now: DateTime<Local>) -> Result<String> {
    let alarm = time
        .parse::<AlarmTime>()
        .with_context(|| format!("Invalid alarm time `{}`", time))?;
    let next = alarm.next_occurrence(now);
    Ok(format!(
        "{}\nNext: {} (in {})",
        alarm,
        next.format("%Y-%m-%d %H:%M"),
        domain::format_countdown(alarm.until_next(now))
    ))
}

/// Load the config file and apply command line overrides
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let mut config = load_config(&path)?;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.clock_format {
        config.clock_format = format.clone();
    }
    Ok(config)
}

fn run_tui(config: &AppConfig) -> Result<()> {
    // Logging is best effort; the UI works without it
    let _logger = match config
        .resolved_log_dir()
        .and_then(|dir| logging::init_logging(&config.log_level, &dir))
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let mut app = AppState::new(config, LocalNotifier::new());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.mount(Instant::now(), Local::now());

    // Run app
    let result = run_app(&mut terminal, &mut app, config);

    // Nothing scheduled or ticking may outlive the screen
    app.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("event=app_exit status=error error={:#}", err);
    }

    result
}

fn run_app<N: Notifier>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<N>,
    config: &AppConfig,
) -> Result<()> {
    let tick_rate = ticker::tick_duration(config.tick_ms);

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // Clock, alarm sync and due notifications
        app.tick(Instant::now(), Local::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn local(h: u32, m: u32) -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2026, 5, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    #[test]
    fn test_check_alarm_later_today() {
        let report = check_alarm("9:05", local(8, 0)).unwrap();
        assert_eq!(report, "09:05\nNext: 2026-05-20 09:05 (in 1h 5m)");
    }

    #[test]
    fn test_check_alarm_rolls_over_to_tomorrow() {
        let report = check_alarm("07:00", local(8, 0)).unwrap();
        assert!(report.starts_with("07:00\nNext: 2026-05-21 07:00"));
    }

    #[test]
    fn test_check_alarm_invalid() {
        let err = check_alarm("25:00", local(8, 0)).unwrap_err();
        assert!(err.to_string().contains("Invalid alarm time `25:00`"));
        assert!(format!("{:#}", err).contains("out of range"));
    }
}
