//! Input overlay rendering.
//!
//! Modal overlays for the add-ticket form and the breach reason editor.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, FormField};

/// Render the add-ticket form as a centered modal.
pub fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.add_form.as_ref() else {
        return;
    };

    let form_width = 46u16.min(area.width.saturating_sub(4));
    let form_height = 11u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(form_width)) / 2;
    let y = area.y + (area.height.saturating_sub(form_height)) / 2;
    let form_area = Rect::new(x, y, form_width, form_height);

    frame.render_widget(Clear, form_area);

    let lines = vec![
        Line::from(""),
        field_line("Ticket ID", &form.ticket_id, form.focus == FormField::TicketId, app),
        Line::from(""),
        field_line(
            "Module",
            &format!("< {} >", form.module()),
            form.focus == FormField::Module,
            app,
        ),
        Line::from(""),
        field_line("Date", &form.date, form.focus == FormField::Date, app),
        Line::from(""),
        Line::from(Span::styled(
            " Tab:next field  ←/→:module  Enter:save  Esc:cancel",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Add Ticket ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), form_area);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool, app: &App) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!(" {:<10}", label), label_style),
        Span::raw(format!("{}{}", value, cursor)),
    ])
}

/// Render the breach reason editor as a centered modal.
pub fn render_reason_editor(frame: &mut Frame, app: &App, area: Rect) {
    let Some(reason) = app.reason_input.as_ref() else {
        return;
    };

    let width = 56u16.min(area.width.saturating_sub(4));
    let height = 6u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let editor_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, editor_area);

    let reference = app
        .selected_ticket()
        .map(|t| t.reference())
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::raw(" "), Span::raw(reason.clone()), Span::raw("_")]),
        Line::from(""),
        Line::from(Span::styled(
            " Enter:save  Esc:cancel",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(format!(" Breach Reason: {} ", reference))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), editor_area);
}
