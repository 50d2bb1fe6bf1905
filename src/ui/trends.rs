//! Trends view rendering.
//!
//! Plots per-category ticket counts over the selected time range as a
//! line chart, one series per category.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the Trends view as a multi-series line chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Trends ({}) [R:range] ", app.range.as_str());

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(chart) = app.chart.as_ref().filter(|c| c.has_data()) else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No chart data available for this time range.",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    // One point per label, evenly spaced along x
    let points: Vec<Vec<(f64, f64)>> = chart
        .series
        .iter()
        .map(|s| {
            s.values.iter().enumerate().map(|(i, &v)| (i as f64, v as f64)).collect()
        })
        .collect();

    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .zip(points.iter())
        .map(|(series, data)| {
            Dataset::default()
                .name(series.category.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(app.theme.series_style(&series.category))
                .data(data)
        })
        .collect();

    let x_max = chart.labels.len().saturating_sub(1).max(1) as f64;
    let y_max = chart.max_value().max(1) as f64;

    // First / middle / last labels keep the axis readable on narrow terminals
    let x_labels: Vec<Span> = [
        chart.labels.first(),
        chart.labels.get(chart.labels.len() / 2).filter(|_| chart.labels.len() > 2),
        chart.labels.last().filter(|_| chart.labels.len() > 1),
    ]
    .into_iter()
    .flatten()
    .map(|l| Span::raw(l.clone()))
    .collect();

    let y_labels: Vec<Span> = vec![
        Span::raw("0"),
        Span::raw(format!("{}", (y_max / 2.0).round() as u64)),
        Span::raw(format!("{}", y_max as u64)),
    ];

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    frame.render_widget(widget, area);
}
