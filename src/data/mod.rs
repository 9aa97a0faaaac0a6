//! Forecast data model and API client
//!
//! This module contains the typed forecast payload returned by the 24-hour
//! forecast endpoint, and the client that fetches it.

pub mod weather;

pub use weather::{WeatherClient, WeatherError, WEATHER_CACHE_KEY};

use serde::{de, Deserialize, Deserializer, Serialize};

/// Forecast document returned by the 24-hour forecast endpoint
///
/// Only the fields the widget displays are modelled; anything else in the
/// response is ignored during decoding. Fields inside the first item's
/// `general` are required, so a response missing them fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    /// The newest forecast item; later items are dropped undecoded
    #[serde(deserialize_with = "first_item_only")]
    pub items: Vec<ForecastItem>,
}

/// Decodes only element 0 of the `items` array
fn first_item_only<'de, D>(deserializer: D) -> Result<Vec<ForecastItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<serde_json::Value>::deserialize(deserializer)?;

    match items.into_iter().next() {
        Some(first) => {
            let item = ForecastItem::deserialize(first).map_err(de::Error::custom)?;
            Ok(vec![item])
        }
        None => Ok(Vec::new()),
    }
}

impl ForecastPayload {
    /// Returns the general conditions of the first forecast item, if any
    pub fn current(&self) -> Option<&GeneralForecast> {
        self.items.first().map(|item| &item.general)
    }
}

/// A single forecast item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    /// Island-wide conditions for the whole forecast window
    pub general: GeneralForecast,
}

/// General conditions for a forecast window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralForecast {
    /// Human-readable forecast, e.g. "Thundery Showers"
    pub forecast: String,
    /// Temperature range in Celsius
    pub temperature: Range,
    /// Relative humidity range in percent
    pub relative_humidity: Range,
    /// Wind conditions
    pub wind: Wind,
}

/// Wind conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Wind speed range in km/h
    pub speed: Range,
}

/// A low/high pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}
