//! Application orchestration for the weather widget
//!
//! This module wires the view controller to the weather client, runs the
//! startup sequence, owns the clock task, and handles keyboard input.

use crossterm::event::{KeyCode, KeyEvent};
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::data::{WeatherClient, WeatherError};
use crate::schedule::{self, TaskHandle};
use crate::view::{RenderError, SharedScreen, ViewController};

/// Message shown whenever the forecast cannot be loaded or displayed
pub const ERROR_MESSAGE: &str = "Could not load weather data. Please try again later.";

/// Interval between clock re-renders
pub const CLOCK_PERIOD: Duration = Duration::from_millis(1000);

/// Anything that can stop the forecast from reaching the screen
///
/// Only ever logged; the user sees [`ERROR_MESSAGE`] instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Fetching or decoding the forecast failed
    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// The forecast could not be rendered
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Main application struct
pub struct App {
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating the retry control was activated
    pub restart_requested: bool,
    /// Renders into the widget's display regions
    view: ViewController,
    /// Forecast API client
    weather_client: WeatherClient,
    /// Recurring clock update, present once started
    clock_task: Option<TaskHandle>,
}

impl App {
    /// Creates a new App with a fresh screen and an empty forecast cache
    pub fn new(config: &Config) -> Self {
        Self::with_parts(ViewController::new(), WeatherClient::new(config))
    }

    /// Creates a new App from an existing view and client
    pub fn with_parts(view: ViewController, weather_client: WeatherClient) -> Self {
        Self {
            should_quit: false,
            restart_requested: false,
            view,
            weather_client,
            clock_task: None,
        }
    }

    /// The view controller this app renders through
    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Handle to the screen the renderer should draw
    pub fn screen(&self) -> SharedScreen {
        self.view.screen()
    }

    /// Runs the startup sequence
    ///
    /// Shows the loading overlay, starts the clock, loads the forecast, and
    /// renders either the forecast or the generic error panel. The overlay
    /// is hidden in both outcomes. Must be called from within a tokio
    /// runtime.
    pub async fn init(&mut self) {
        self.view.show_loading();
        self.start_time_updates();

        if let Err(error) = self.load_weather().await {
            tracing::error!(%error, "Could not display forecast");
            self.view.show_error(ERROR_MESSAGE);
        }

        self.view.hide_loading();
    }

    /// Fetches the forecast and renders it
    async fn load_weather(&self) -> Result<(), AppError> {
        let payload = self.weather_client.get_weather().await?;
        self.view.update_weather(&payload)?;
        Ok(())
    }

    /// Renders the time now, then every [`CLOCK_PERIOD`]
    fn start_time_updates(&mut self) {
        self.view.update_time();

        let view = self.view.clone();
        let task = schedule::every(CLOCK_PERIOD, move || view.update_time());

        // Replacing a previous handle stops that clock.
        self.clock_task = Some(task);
    }

    /// Returns true while the recurring clock update is scheduled
    pub fn is_clock_running(&self) -> bool {
        self.clock_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Stops the clock and any pending overlay fade
    ///
    /// After this returns no task started by the app is still scheduled.
    pub async fn shutdown(&mut self) {
        if let Some(task) = self.clock_task.take() {
            task.cancel().await;
        }
        self.view.cancel_pending().await;
        tracing::debug!("App shut down");
    }

    /// Handles keyboard input
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit the application
    /// - `r` or `Enter`: Activate the retry control, when the error panel shows it
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Enter => {
                if self.view.shows_retry() {
                    tracing::info!("Retry requested");
                    self.restart_requested = true;
                }
            }
            _ => {}
        }
    }
}
