//! Ticket detail overlay rendering.
//!
//! Displays a modal overlay with the full record for the selected ticket.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{Action, SlaSeverity, TicketStatus};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 44;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the ticket detail as a modal overlay.
///
/// Shows the full ticket record including SLA state, closure and breach
/// dates, and the actions the current role may take on it.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ticket) = app.selected_ticket() else {
        return;
    };

    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 80);
    let overlay_height = (area.height * 70 / 100).clamp(MIN_OVERLAY_HEIGHT, 20);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(10),   // Record fields
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let severity = ticket.severity();
    let severity_style = app.theme.severity_style(severity);
    let severity_label = match severity {
        SlaSeverity::Breached => "Breached",
        SlaSeverity::DueToday => "SLA due today",
        SlaSeverity::OnTrack => "Within SLA",
        SlaSeverity::Closed => "Closed",
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(
            format!(" {} ", ticket.reference()),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Status: "),
            Span::styled(ticket.status.label(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("    SLA: "),
            Span::styled(severity_label, severity_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw(" Logged: "),
            Span::raw(ticket.date_logged.to_string()),
            Span::raw(format!("    Days to SLA: {}", ticket.days_to_sla)),
        ]),
    ];

    if let Some(day_closed) = ticket.day_closed {
        lines.push(Line::from(vec![
            Span::raw(" Closed: "),
            Span::raw(day_closed.to_string()),
        ]));
    }
    if let Some(breached_date) = ticket.breached_date {
        lines.push(Line::from(vec![
            Span::raw(" Breached: "),
            Span::styled(breached_date.to_string(), severity_style),
        ]));
    }

    lines.push(Line::from(""));
    let reason_line = match &ticket.breach_reason {
        Some(reason) => Line::from(vec![
            Span::raw(" Breach reason: "),
            Span::raw(reason.clone()),
        ]),
        None if ticket.needs_breach_reason() => Line::from(vec![
            Span::raw(" Breach reason: "),
            Span::styled("none recorded [b]", Style::default().fg(app.theme.warning)),
        ]),
        None => Line::from(Span::styled(
            " Breach reason: n/a",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    lines.push(reason_line);

    // Action hints, filtered to what the session allows
    let mut actions: Vec<&str> = Vec::new();
    if ticket.status == TicketStatus::Open && app.session.allows(Action::CloseTicket) {
        actions.push("c:close");
    }
    if ticket.status == TicketStatus::Closed && app.session.allows(Action::ReopenTicket) {
        actions.push("o:reopen");
    }
    if app.session.allows(Action::DeleteTicket) {
        actions.push("d:delete");
    }
    if ticket.needs_breach_reason() && app.session.allows(Action::EditBreachReason) {
        actions.push("b:reason");
    }

    lines.push(Line::from(""));
    if actions.is_empty() {
        lines.push(Line::from(Span::styled(
            " No actions available for this role",
            Style::default().add_modifier(Modifier::DIM),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::raw(" Actions: "),
            Span::styled(actions.join("  "), Style::default().fg(app.theme.highlight)),
        ]));
    }

    let block = Block::default()
        .title(" Ticket Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}
