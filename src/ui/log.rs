//! Incident log view rendering.
//!
//! Displays the generated incident log text verbatim in a scrollable pane.
//! The text shown here is exactly what `e` exports to disk.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the Log view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Incident Log [e:export] ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.log_text.is_empty() {
        let empty = Paragraph::new("  Waiting for ticket data...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let paragraph = Paragraph::new(app.log_text.as_str())
        .block(block)
        .scroll((app.log_scroll, 0));

    frame.render_widget(paragraph, area);
}
