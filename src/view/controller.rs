//! Rendering operations for the widget
//!
//! The `ViewController` resolves its display regions once, at construction,
//! by holding a handle to the shared [`Screen`]. Every operation is a
//! synchronous write; the only deferred work is the second half of hiding
//! the loading overlay.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use thiserror::Error;

use super::screen::{ErrorPanel, ForecastCard, Screen, SharedScreen, WeatherRegion};
use crate::clock::{self, SharedClock};
use crate::data::ForecastPayload;
use crate::schedule::{self, TaskHandle};

/// Delay between fading the loading overlay and removing it from layout
pub const FADE_DURATION: Duration = Duration::from_millis(300);

/// Errors raised while building display content
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload has no forecast item to show
    #[error("Forecast payload has no items")]
    MissingItems,
}

/// Writes forecast, error, loading, and clock content onto the screen
///
/// Clones share the same screen and the same pending fade, so a clone handed
/// to a timer task acts on the same display.
#[derive(Debug, Clone)]
pub struct ViewController {
    screen: SharedScreen,
    pending_hide: Arc<Mutex<Option<TaskHandle>>>,
    clock: SharedClock,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    /// Creates a controller over a fresh, empty screen
    pub fn new() -> Self {
        Self::with_screen(Screen::shared())
    }

    /// Creates a controller writing into an existing screen
    pub fn with_screen(screen: SharedScreen) -> Self {
        Self {
            screen,
            pending_hide: Arc::new(Mutex::new(None)),
            clock: clock::system(),
        }
    }

    /// Reads the current time from `clock` instead of the system clock
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Handle to the screen this controller writes into
    pub fn screen(&self) -> SharedScreen {
        Arc::clone(&self.screen)
    }

    /// Copy of the screen as it is right now
    pub fn snapshot(&self) -> Screen {
        self.screen.lock().clone()
    }

    /// Returns true if the error panel, and with it the retry control, is shown
    pub fn shows_retry(&self) -> bool {
        self.screen.lock().weather.has_retry_control()
    }

    /// Shows the loading overlay immediately
    ///
    /// Any fade still waiting to remove the overlay is cancelled, so a
    /// show that follows a hide always wins.
    pub fn show_loading(&self) {
        let stale = self.pending_hide.lock().take();
        drop(stale);

        let mut screen = self.screen.lock();
        screen.overlay.displayed = true;
        screen.overlay.opacity = 1.0;
    }

    /// Fades the loading overlay out and removes it after [`FADE_DURATION`]
    ///
    /// Returns without waiting for the removal. Must be called from within a
    /// tokio runtime.
    pub fn hide_loading(&self) {
        self.screen.lock().overlay.opacity = 0.0;

        let screen = Arc::clone(&self.screen);
        let task = schedule::after(FADE_DURATION, move || {
            let mut screen = screen.lock();
            // A show since the fade started restores opacity; leave it visible.
            if screen.overlay.opacity <= 0.0 {
                screen.overlay.displayed = false;
            }
        });

        let previous = self.pending_hide.lock().replace(task);
        drop(previous);
    }

    /// Returns true while a fade is waiting to remove the overlay
    pub fn has_pending_hide(&self) -> bool {
        self.pending_hide
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Cancels a pending fade and waits for it to stop
    pub async fn cancel_pending(&self) {
        let task = self.pending_hide.lock().take();
        if let Some(task) = task {
            task.cancel().await;
        }
    }

    /// Replaces the weather region with a card for the first forecast item
    ///
    /// # Returns
    /// * `Ok(())` if the card was rendered
    /// * `Err(RenderError::MissingItems)` if the payload has no items; the
    ///   region is left untouched
    pub fn update_weather(&self, payload: &ForecastPayload) -> Result<(), RenderError> {
        let general = payload.current().ok_or(RenderError::MissingItems)?;
        let card = ForecastCard::from_general(general);

        self.screen.lock().weather = WeatherRegion::Forecast(card);
        Ok(())
    }

    /// Replaces the weather region with an error panel and a retry control
    pub fn show_error(&self, message: &str) {
        self.screen.lock().weather = WeatherRegion::Error(ErrorPanel {
            message: message.to_string(),
        });
    }

    /// Renders the current time into the clock region
    pub fn update_time(&self) {
        let text = format_time(self.clock.now());
        self.screen.lock().clock = text;
    }
}

/// Formats an instant as `YYYY-MM-DD HH:MM:SS UTC`, dropping sub-seconds
pub fn format_time(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
