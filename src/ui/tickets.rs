//! Tickets view rendering.
//!
//! Displays a table of all tickets with status, SLA urgency, and any
//! recorded breach reason.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{SlaSeverity, Ticket};

/// Column to sort by in the Tickets view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Keep the display order (open tickets first, oldest first).
    #[default]
    Display,
    /// Sort by ticket id.
    TicketId,
    /// Sort by module name alphabetically.
    Module,
    /// Sort by date logged.
    Logged,
    /// Sort by days remaining to SLA.
    Sla,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Display => SortColumn::TicketId,
            SortColumn::TicketId => SortColumn::Module,
            SortColumn::Module => SortColumn::Logged,
            SortColumn::Logged => SortColumn::Sla,
            SortColumn::Sla => SortColumn::Display,
        }
    }
}

/// Render the Tickets view showing all tickets in a sortable table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    // Get filtered and sorted ticket indices
    let mut tickets: Vec<(usize, &Ticket)> =
        app.tickets.iter().enumerate().filter(|(_, t)| app.matches_filter(t)).collect();
    sort_tickets_by(&mut tickets, app.sort_column, app.sort_ascending);

    let header = Row::new(vec![
        Cell::from(format_header("Ticket", SortColumn::TicketId, app)),
        Cell::from(format_header("Module", SortColumn::Module, app)),
        Cell::from(format_header("Logged", SortColumn::Logged, app)),
        Cell::from(format_header("SLA", SortColumn::Sla, app)),
        Cell::from("Status"),
        Cell::from("Breach Reason"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = tickets
        .iter()
        .map(|(_, t)| {
            let severity = t.severity();
            let sla_style = app.theme.severity_style(severity);

            let status_style = match t.status {
                crate::data::TicketStatus::Open => Style::default(),
                crate::data::TicketStatus::Closed => Style::default().fg(app.theme.muted),
            };

            let reason = t.breach_reason.clone().unwrap_or_else(|| {
                if severity == SlaSeverity::Breached {
                    "-".to_string()
                } else {
                    String::new()
                }
            });

            Row::new(vec![
                Cell::from(t.ticket_id.clone()),
                Cell::from(t.module.clone()),
                Cell::from(t.date_logged.to_string()),
                Cell::from(format_sla(t)).style(sla_style),
                Cell::from(t.status.label()).style(status_style),
                Cell::from(reason),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),     // Ticket
        Constraint::Fill(2),        // Module
        Constraint::Length(12),     // Logged
        Constraint::Length(12),     // SLA
        Constraint::Length(8),      // Status
        Constraint::Fill(3),        // Breach Reason
    ];

    // Selection is a visual index; clamp it to the filtered list
    let selected_visual_index = app.selected_index.min(tickets.len().saturating_sub(1));

    let sort_indicator = match app.sort_column {
        SortColumn::Display => "default",
        SortColumn::TicketId => "ticket",
        SortColumn::Module => "module",
        SortColumn::Logged => "logged",
        SortColumn::Sla => "sla",
    };
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    // Build title with filter info
    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    // Show scroll position if there are items
    let position_info = if !tickets.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, tickets.len())
    } else {
        String::new()
    };

    let title = format!(
        " Tickets ({}/{}) [s:sort {}{}]{}{} ",
        tickets.len(),
        app.tickets.len(),
        sort_indicator,
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected_visual_index));

    frame.render_stateful_widget(table, area, &mut state);

    if app.tickets.is_empty() && app.tickets_loaded {
        let empty = ratatui::widgets::Paragraph::new("  No tickets. Press a to add one.")
            .style(Style::default().add_modifier(Modifier::DIM));
        let inner = Rect::new(area.x + 1, area.y + 2, area.width.saturating_sub(2), 1);
        frame.render_widget(empty, inner);
    }
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Human-readable SLA cell: days remaining for open tickets, how far past
/// the window for breached ones.
fn format_sla(ticket: &Ticket) -> String {
    match ticket.severity() {
        SlaSeverity::Closed => "-".to_string(),
        SlaSeverity::Breached => format!("{}d over", -ticket.days_to_sla),
        SlaSeverity::DueToday => "due today".to_string(),
        SlaSeverity::OnTrack => format!("{}d left", ticket.days_to_sla),
    }
}

/// Sort tickets by the given column and direction (public for use in app.rs)
pub fn sort_tickets_by(tickets: &mut [(usize, &Ticket)], column: SortColumn, ascending: bool) {
    tickets.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Display => a.0.cmp(&b.0),
            SortColumn::TicketId => a.1.ticket_id.cmp(&b.1.ticket_id),
            SortColumn::Module => a.1.module.cmp(&b.1.module),
            SortColumn::Logged => a.1.date_logged.cmp(&b.1.date_logged),
            SortColumn::Sla => a.1.days_to_sla.cmp(&b.1.days_to_sla),
        };

        // Apply direction to primary comparison
        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        // Use secondary sort by ticket id for stability when primary values are equal
        if primary == std::cmp::Ordering::Equal {
            a.1.ticket_id.cmp(&b.1.ticket_id)
        } else {
            primary
        }
    });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::TicketStatus;

    fn ticket(ticket_id: &str, module: &str, days_to_sla: i32, day: u32) -> Ticket {
        Ticket {
            id: None,
            ticket_id: ticket_id.to_string(),
            module: module.to_string(),
            date_logged: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            days_to_sla,
            status: TicketStatus::Open,
            day_closed: None,
            breached_date: None,
            breach_reason: None,
        }
    }

    #[test]
    fn test_display_sort_keeps_input_order() {
        let a = ticket("9", "B", 1, 2);
        let b = ticket("1", "A", 5, 1);
        let mut rows = vec![(0, &a), (1, &b)];
        sort_tickets_by(&mut rows, SortColumn::Display, true);
        assert_eq!(rows[0].1.ticket_id, "9");
        assert_eq!(rows[1].1.ticket_id, "1");
    }

    #[test]
    fn test_sla_sort_descending() {
        let a = ticket("1", "A", -2, 1);
        let b = ticket("2", "A", 3, 1);
        let mut rows = vec![(0, &a), (1, &b)];
        sort_tickets_by(&mut rows, SortColumn::Sla, false);
        assert_eq!(rows[0].1.days_to_sla, 3);
    }

    #[test]
    fn test_equal_keys_fall_back_to_ticket_id() {
        let a = ticket("20", "A", 1, 1);
        let b = ticket("10", "A", 1, 1);
        let mut rows = vec![(0, &a), (1, &b)];
        sort_tickets_by(&mut rows, SortColumn::Module, true);
        assert_eq!(rows[0].1.ticket_id, "10");
    }

    #[test]
    fn test_sla_cell_wording() {
        let mut t = ticket("1", "A", -3, 1);
        assert_eq!(format_sla(&t), "3d over");
        t.days_to_sla = 0;
        assert_eq!(format_sla(&t), "due today");
        t.days_to_sla = 4;
        assert_eq!(format_sla(&t), "4d left");
        t.status = TicketStatus::Closed;
        assert_eq!(format_sla(&t), "-");
    }

    #[test]
    fn test_sort_column_cycle_returns_to_display() {
        let mut col = SortColumn::default();
        for _ in 0..5 {
            col = col.next();
        }
        assert_eq!(col, SortColumn::Display);
    }
}
