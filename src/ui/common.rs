//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::{SlaSeverity, TicketStatus};

/// Render the header bar with a ticket overview.
///
/// Displays: status indicator, ticket counts by urgency, backend source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if !app.tickets_loaded {
        let line = Line::from(vec![
            Span::styled(
                " INCIDENT TRACKER ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    // Count tickets by state
    let mut open = 0;
    let mut breached = 0;
    let mut closed = 0;

    for ticket in &app.tickets {
        match ticket.status {
            TicketStatus::Closed => closed += 1,
            TicketStatus::Open => {
                open += 1;
                if ticket.severity() == SlaSeverity::Breached {
                    breached += 1;
                }
            }
        }
    }

    // Overall status indicator
    let (status_icon, status_style) = if breached > 0 {
        ("●", app.theme.severity_style(SlaSeverity::Breached))
    } else if open > 0 {
        ("●", app.theme.severity_style(SlaSeverity::DueToday))
    } else {
        ("●", app.theme.severity_style(SlaSeverity::OnTrack))
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", status_icon), status_style),
        Span::styled("INCIDENTS ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", open), Style::default().fg(app.theme.warning)),
        Span::raw(" open "),
        if breached > 0 {
            Span::styled(
                format!("{}", breached),
                Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" breached "),
        Span::styled(format!("{}", closed), Style::default().fg(app.theme.muted)),
        Span::raw(" closed │ "),
        Span::styled(
            format!("{} {}", app.session.role().label(), if app.session.is_active() { "" } else { "(expired)" }),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::raw("│ "),
        Span::raw(app.source_description().to_string()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Tickets "),
        Line::from(" 2:Trends "),
        Line::from(" 3:Log "),
    ];

    let selected = match app.current_view {
        View::Tickets => 0,
        View::Trends => 1,
        View::Log => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: time since last update, available controls. Also displays
/// temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else if let Some(updated) = app.last_updated {
        // Context-sensitive controls
        let controls = match app.current_view {
            View::Tickets => {
                if app.filter_active {
                    "Type to search | Enter:apply Esc:cancel"
                } else if app.show_detail_overlay {
                    "c:close o:reopen d:delete b:reason Esc:back"
                } else {
                    "/:search s:sort a:add Tab:switch Enter:detail ?:help q:quit"
                }
            }
            View::Trends => "R:range Tab:switch r:refresh ?:help q:quit",
            View::Log => "↑↓:scroll e:export Tab:switch ?:help q:quit",
        };

        format!(" Updated {:.1}s ago | {}", updated.elapsed().as_secs_f64(), controls)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list / scroll log"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Ticket detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Tickets",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter / close ticket"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from("  a         Add a ticket"),
        Line::from("  o         Reopen ticket"),
        Line::from("  d         Delete ticket"),
        Line::from("  b         Record breach reason"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh data"),
        Line::from("  R         Cycle trend range"),
        Line::from("  e         Export incident log"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 30u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
