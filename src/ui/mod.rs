//! UI rendering module for the weather widget
//!
//! This module draws a [`Screen`] into a terminal frame using ratatui. It
//! only reads the screen; all writes go through the view controller.

pub mod loading_overlay;
pub mod weather_widget;

pub use loading_overlay::render as render_loading_overlay;
pub use weather_widget::render as render_weather_widget;

use ratatui::Frame;

use crate::view::Screen;

/// Renders the whole widget, overlay last so it sits on top
pub fn render(frame: &mut Frame, screen: &Screen) {
    render_weather_widget(frame, screen);

    if screen.overlay.displayed {
        render_loading_overlay(frame, &screen.overlay);
    }
}
