//! Loading overlay
//!
//! Renders a centered modal box while the forecast is loading. During the
//! fade the box is drawn dimmed until the view removes it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::view::LoadingOverlay;

/// Renders the loading overlay on top of the current view
pub fn render(frame: &mut Frame, overlay: &LoadingOverlay) {
    let area = frame.area();
    let overlay_area = centered_rect(36, 5, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let style = if overlay.is_fading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);

    let paragraph = Paragraph::new("\nLoading weather data...")
        .style(style)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, overlay_area);
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
