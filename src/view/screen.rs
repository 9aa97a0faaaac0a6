//! Display regions of the widget
//!
//! Each region is plain data. Writing a region replaces its contents
//! wholesale; nothing is patched in place.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::data::GeneralForecast;

/// Label of the control that restarts the widget from the error panel
pub const RETRY_LABEL: &str = "Retry";

/// Screen shared between the view controller and the renderer
pub type SharedScreen = Arc<Mutex<Screen>>;

/// Everything the widget displays
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Screen {
    /// Forecast card, error panel, or nothing yet
    pub weather: WeatherRegion,
    /// Loading overlay drawn above the weather region
    pub overlay: LoadingOverlay,
    /// Current time text, empty until the clock first renders
    pub clock: String,
}

impl Screen {
    /// Creates an empty screen behind a shared handle
    pub fn shared() -> SharedScreen {
        Arc::new(Mutex::new(Self::default()))
    }
}

/// Contents of the weather region
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeatherRegion {
    /// Nothing rendered yet
    #[default]
    Empty,
    /// A rendered forecast
    Forecast(ForecastCard),
    /// An error message with a retry control
    Error(ErrorPanel),
}

impl WeatherRegion {
    /// Lines of text shown in the region
    pub fn lines(&self) -> Vec<String> {
        match self {
            WeatherRegion::Empty => Vec::new(),
            WeatherRegion::Forecast(card) => card.lines(),
            WeatherRegion::Error(panel) => panel.lines(),
        }
    }

    /// All text in the region, one line per row
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Returns true if the retry control is on screen
    pub fn has_retry_control(&self) -> bool {
        matches!(self, WeatherRegion::Error(_))
    }
}

/// Rendered forecast, with every range already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    /// Forecast text as sent by the API
    pub forecast: String,
    /// `"{low}°C - {high}°C"`
    pub temperature: String,
    /// `"{low}% - {high}%"`
    pub humidity: String,
    /// `"{low} - {high}"` in km/h
    pub wind: String,
}

impl ForecastCard {
    /// Title line of the card
    pub const TITLE: &'static str = "Current Forecast";

    /// Formats the general conditions of a forecast into a card
    pub fn from_general(general: &GeneralForecast) -> Self {
        let temperature = &general.temperature;
        let humidity = &general.relative_humidity;
        let wind = &general.wind.speed;

        Self {
            forecast: general.forecast.clone(),
            temperature: format!("{}°C - {}°C", temperature.low, temperature.high),
            humidity: format!("{}% - {}%", humidity.low, humidity.high),
            wind: format!("{} - {}", wind.low, wind.high),
        }
    }

    /// Lines of the card, title first
    pub fn lines(&self) -> Vec<String> {
        vec![
            Self::TITLE.to_string(),
            self.forecast.clone(),
            format!("Temperature: {}", self.temperature),
            format!("Humidity: {}", self.humidity),
            format!("Wind: {} km/h", self.wind),
        ]
    }
}

/// Error message shown in place of the forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPanel {
    /// Message shown above the retry control
    pub message: String,
}

impl ErrorPanel {
    /// Lines of the panel, message first and the retry control last
    pub fn lines(&self) -> Vec<String> {
        vec![format!("🚨 {}", self.message), format!("[ {} ]", RETRY_LABEL)]
    }
}

/// Loading overlay state
///
/// Hiding is two-step: the overlay first fades (opacity drops to zero) and
/// is removed from layout once the fade delay has passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingOverlay {
    /// Whether the overlay takes part in layout at all
    pub displayed: bool,
    /// 1.0 is fully opaque, 0.0 is faded out
    pub opacity: f32,
}

impl Default for LoadingOverlay {
    fn default() -> Self {
        Self {
            displayed: false,
            opacity: 1.0,
        }
    }
}

impl LoadingOverlay {
    /// Returns true while the overlay is displayed and mid-fade
    pub fn is_fading(&self) -> bool {
        self.displayed && self.opacity <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Range, Wind};

    fn general() -> GeneralForecast {
        GeneralForecast {
            forecast: "Cloudy".to_string(),
            temperature: Range { low: 24.0, high: 31.0 },
            relative_humidity: Range { low: 60.0, high: 95.0 },
            wind: Wind {
                speed: Range { low: 10.0, high: 20.0 },
            },
        }
    }

    #[test]
    fn test_forecast_card_formats_ranges() {
        let card = ForecastCard::from_general(&general());
        assert_eq!(card.forecast, "Cloudy");
        assert_eq!(card.temperature, "24°C - 31°C");
        assert_eq!(card.humidity, "60% - 95%");
        assert_eq!(card.wind, "10 - 20");
    }

    #[test]
    fn test_forecast_card_keeps_fractional_values() {
        let mut general = general();
        general.temperature = Range { low: 24.5, high: 31.0 };
        let card = ForecastCard::from_general(&general);
        assert_eq!(card.temperature, "24.5°C - 31°C");
    }

    #[test]
    fn test_forecast_region_text_has_title_and_units() {
        let region = WeatherRegion::Forecast(ForecastCard::from_general(&general()));
        let text = region.text();
        assert!(text.starts_with("Current Forecast"));
        assert!(text.contains("Temperature: 24°C - 31°C"));
        assert!(text.contains("Humidity: 60% - 95%"));
        assert!(text.contains("Wind: 10 - 20 km/h"));
        assert!(!region.has_retry_control());
    }

    #[test]
    fn test_error_region_shows_message_and_retry() {
        let region = WeatherRegion::Error(ErrorPanel {
            message: "Something broke".to_string(),
        });
        let text = region.text();
        assert!(text.contains("Something broke"));
        assert!(text.contains(RETRY_LABEL));
        assert!(region.has_retry_control());
    }

    #[test]
    fn test_empty_region_has_no_text() {
        assert_eq!(WeatherRegion::Empty.text(), "");
    }

    #[test]
    fn test_default_overlay_is_hidden_and_opaque() {
        let overlay = LoadingOverlay::default();
        assert!(!overlay.displayed);
        assert!(!overlay.is_fading());
    }
}
