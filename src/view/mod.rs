//! Widget view state and rendering operations
//!
//! The [`Screen`] holds the three display regions the widget writes into:
//! the weather region, the loading overlay, and the clock. The
//! [`ViewController`] owns a handle to that screen and performs every write;
//! the terminal renderer in `crate::ui` only reads it.

pub mod controller;
pub mod screen;

pub use controller::{format_time, RenderError, ViewController, FADE_DURATION};
pub use screen::{
    ErrorPanel, ForecastCard, LoadingOverlay, Screen, SharedScreen, WeatherRegion, RETRY_LABEL,
};
