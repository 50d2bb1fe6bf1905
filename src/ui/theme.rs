//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::SlaSeverity;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for tickets whose SLA falls due today.
    pub warning: Color,
    /// Color for tickets that have breached their SLA.
    pub critical: Color,
    /// Color for tickets comfortably inside their SLA window.
    pub ok: Color,
    /// Color for closed tickets and other muted text.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            ok: Color::Green,
            muted: Color::DarkGray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            ok: Color::Green,
            muted: Color::Gray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a ticket's SLA severity
    pub fn severity_style(&self, severity: SlaSeverity) -> Style {
        match severity {
            SlaSeverity::Breached => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            SlaSeverity::DueToday => Style::default().fg(self.warning),
            SlaSeverity::OnTrack => Style::default().fg(self.ok),
            SlaSeverity::Closed => Style::default().fg(self.muted),
        }
    }

    /// Get the line style for a trend chart category.
    ///
    /// Categories map to fixed colors so series keep the same color across
    /// refreshes regardless of which categories the backend returns.
    pub fn series_style(&self, category: &str) -> Style {
        let color = match category {
            "Raised" => Color::Blue,
            "Open" => Color::Yellow,
            "Closed" => Color::Gray,
            "Breached" => Color::Red,
            _ => Color::White,
        };
        Style::default().fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_styles_are_fixed_per_category() {
        let theme = Theme::dark();
        assert_eq!(theme.series_style("Raised"), theme.series_style("Raised"));
        assert_eq!(theme.series_style("Breached").fg, Some(Color::Red));
        assert_eq!(theme.series_style("Open").fg, Some(Color::Yellow));
        assert_eq!(theme.series_style("Closed").fg, Some(Color::Gray));
        assert_eq!(theme.series_style("Raised").fg, Some(Color::Blue));
    }

    #[test]
    fn test_unknown_category_gets_fallback_color() {
        let theme = Theme::light();
        assert_eq!(theme.series_style("Reopened").fg, Some(Color::White));
    }

    #[test]
    fn test_breached_severity_is_bold() {
        let theme = Theme::dark();
        let style = theme.severity_style(SlaSeverity::Breached);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}
