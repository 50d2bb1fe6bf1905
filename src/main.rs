// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod config;
mod data;
mod events;
mod remote;
mod ui;

use app::{App, View};
use config::Settings;
use data::{format_incident_log, Range, Role, Session};
use remote::{Backend, OfflineBackend, Remote, RestBackend};

#[derive(Parser, Debug)]
#[command(name = "incidentwatch")]
#[command(about = "Terminal dashboard for tracking incident tickets and SLA breaches")]
struct Args {
    /// Base URL of the ticket API (e.g. http://localhost:8080)
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Bearer token for API authentication
    #[arg(short, long, requires = "url")]
    token: Option<String>,

    /// Role to operate as: admin, user, or viewer
    #[arg(long)]
    role: Option<String>,

    /// Browse a local ticket JSON file instead of an API
    #[arg(short, long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Initial trend chart range: daily, weekly, or monthly
    #[arg(long, default_value = "daily")]
    range: Range,

    /// Auto-refresh interval in seconds (0 disables)
    #[arg(short, long, default_value = "30")]
    refresh: u64,

    /// Write the incident log to a file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Path to a settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append logs to this file (the terminal is busy drawing the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(file)
            .with_ansi(false)
            .init();
    }

    let settings = Settings::load(args.config.as_deref())?.with_overrides(
        args.url.clone(),
        args.token.clone(),
        args.role.clone(),
    );

    let role = match settings.role.as_deref() {
        Some(name) => name.parse::<Role>().map_err(|e| anyhow::anyhow!(e))?,
        None => Role::default(),
    };

    // The worker runs on a tokio runtime while the TUI loop stays on the
    // main thread.
    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&rt, &args, &settings, export_path);
    }

    let remote = {
        let _guard = rt.enter();
        build_remote(&args, &settings)?
    };

    let refresh = Duration::from_secs(args.refresh);
    run_tui(remote, Session::new(role), args.range, refresh)
}

/// Build the worker over whichever backend the flags selected.
fn build_remote(args: &Args, settings: &Settings) -> Result<Remote> {
    if let Some(ref path) = args.file {
        let backend = OfflineBackend::load(path)?;
        return Ok(remote::connect(backend));
    }
    let url = settings
        .url
        .as_deref()
        .context("no backend: pass --url (with optional --token) or --file")?;
    let backend = RestBackend::new(url, settings.token.clone())?;
    Ok(remote::connect(backend))
}

/// Fetch tickets once, write the incident log text to a file, and exit.
fn export_to_file(
    rt: &tokio::runtime::Runtime,
    args: &Args,
    settings: &Settings,
    export_path: &std::path::Path,
) -> Result<()> {
    let tickets = rt.block_on(async {
        if let Some(ref path) = args.file {
            let mut backend = OfflineBackend::load(path)?;
            Ok::<_, anyhow::Error>(backend.fetch_tickets().await?)
        } else {
            let url = settings
                .url
                .as_deref()
                .context("no backend: pass --url (with optional --token) or --file")?;
            let mut backend = RestBackend::new(url, settings.token.clone())?;
            Ok(backend.fetch_tickets().await?)
        }
    })?;

    let mut sorted = tickets;
    data::sort_for_display(&mut sorted);
    let text = format_incident_log(&sorted, Local::now());
    std::fs::write(export_path, &text)
        .with_context(|| format!("failed to write {}", export_path.display()))?;

    println!("Exported incident log to: {}", export_path.display());
    Ok(())
}

/// Run the TUI over the given backend handle
fn run_tui(remote: Remote, session: Session, range: Range, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and kick off the initial fetch
    let mut app = App::new(remote, session);
    app.range = range;
    app.refresh();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Fold completed backend requests into state before drawing
        app.poll_remote();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with ticket counts
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Tickets => ui::tickets::render(frame, app, chunks[2]),
                View::Trends => ui::trends::render(frame, app, chunks[2]),
                View::Log => ui::log::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render overlays if active
            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }
            if app.add_form.is_some() {
                ui::form::render_add_form(frame, app, area);
            }
            if app.reason_input.is_some() {
                ui::form::render_reason_editor(frame, app, area);
            }
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh data periodically
        if !refresh_interval.is_zero() && last_refresh.elapsed() >= refresh_interval {
            app.refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
