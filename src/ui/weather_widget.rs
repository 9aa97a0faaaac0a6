//! Weather widget rendering
//!
//! Draws the header with the live clock, the weather region (forecast card
//! or error panel), and the key help line.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::view::{ErrorPanel, ForecastCard, Screen, WeatherRegion, RETRY_LABEL};

/// Renders the widget screen
pub fn render(frame: &mut Frame, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header with clock
            Constraint::Min(7),    // Weather region
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    render_header(frame, chunks[0], screen);
    render_weather_region(frame, chunks[1], &screen.weather);
    render_help(frame, chunks[2], &screen.weather);
}

/// Renders the title and the current time
fn render_header(frame: &mut Frame, area: Rect, screen: &Screen) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "ShoreSquad",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    let clock = Paragraph::new(screen.clock.as_str())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Right);

    frame.render_widget(title, halves[0]);
    frame.render_widget(clock, halves[1]);
}

/// Renders whatever the weather region currently holds
fn render_weather_region(frame: &mut Frame, area: Rect, region: &WeatherRegion) {
    let block = Block::default()
        .title(" Weather ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = match region {
        WeatherRegion::Empty => Vec::new(),
        WeatherRegion::Forecast(card) => forecast_lines(card),
        WeatherRegion::Error(panel) => error_lines(panel),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn forecast_lines(card: &ForecastCard) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            ForecastCard::TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(card.forecast.clone()),
        labelled("Temperature", card.temperature.clone()),
        labelled("Humidity", card.humidity.clone()),
        labelled("Wind", format!("{} km/h", card.wind)),
    ]
}

fn error_lines(panel: &ErrorPanel) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("🚨 {}", panel.message),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {} ]", RETRY_LABEL),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ]
}

/// Creates a line with a highlighted label and its value
fn labelled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

/// Renders the key help at the bottom of the screen
fn render_help(frame: &mut Frame, area: Rect, region: &WeatherRegion) {
    let mut help_spans = Vec::new();

    if region.has_retry_control() {
        help_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
        help_spans.push(Span::raw(" Retry  "));
    }
    help_spans.push(Span::styled("q", Style::default().fg(Color::Yellow)));
    help_spans.push(Span::raw(" Quit"));

    let help_text = Line::from(help_spans);
    let paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
