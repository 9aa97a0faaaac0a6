//! End-to-end tests for the widget startup sequence.
//!
//! Runs `App::init` against a mock forecast server and inspects the screen.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shoresquad::app::{App, ERROR_MESSAGE};
use shoresquad::config::Config;
use shoresquad::view::{WeatherRegion, FADE_DURATION};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORECAST_PATH: &str = "/v1/environment/24-hour-weather-forecast";

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "items": [{
            "general": {
                "forecast": "Cloudy",
                "relative_humidity": { "low": 60, "high": 95 },
                "temperature": { "low": 24, "high": 31 },
                "wind": { "speed": { "low": 10, "high": 20 }, "direction": "S" }
            }
        }]
    })
}

fn config_for(server: &MockServer) -> Config {
    Config::with_endpoint(format!("{}{}", server.uri(), FORECAST_PATH))
}

async fn wait_for_fade() {
    tokio::time::sleep(FADE_DURATION + Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_init_renders_forecast_and_hides_loading() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let mut app = App::new(&config_for(&mock_server));
    app.init().await;

    let screen = app.view().snapshot();
    let text = screen.weather.text();
    assert!(text.contains("Cloudy"));
    assert!(text.contains("24°C - 31°C"));
    assert!(text.contains("60% - 95%"));
    assert!(text.contains("10 - 20"));
    assert!(screen.overlay.is_fading(), "Overlay fades as soon as init returns");
    assert!(screen.clock.ends_with(" UTC"));
    assert!(app.is_clock_running());

    wait_for_fade().await;
    assert!(!app.view().snapshot().overlay.displayed);

    app.shutdown().await;
    assert!(!app.is_clock_running());
}

#[tokio::test]
async fn test_partial_later_items_still_render_first_forecast() {
    let mut body = forecast_body();
    body["items"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!({ "timestamp": "2025-06-02T11:00:00+08:00" }));

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let mut app = App::new(&config_for(&mock_server));
    app.init().await;

    let screen = app.view().snapshot();
    assert!(screen.weather.text().contains("Cloudy"));
    assert!(!screen.weather.has_retry_control());

    app.shutdown().await;
}

#[tokio::test]
async fn test_fetch_failure_shows_generic_error_with_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut app = App::new(&config_for(&mock_server));
    app.init().await;

    let screen = app.view().snapshot();
    match &screen.weather {
        WeatherRegion::Error(panel) => assert_eq!(panel.message, ERROR_MESSAGE),
        other => panic!("Expected error panel, got {:?}", other),
    }
    assert!(!screen.weather.text().contains("503"), "Error detail is only logged");
    assert!(screen.weather.has_retry_control());

    wait_for_fade().await;
    assert!(!app.view().snapshot().overlay.displayed);

    app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));
    assert!(app.restart_requested);

    app.shutdown().await;
}

#[tokio::test]
async fn test_empty_forecast_shows_generic_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })),
        )
        .mount(&mock_server)
        .await;

    let mut app = App::new(&config_for(&mock_server));
    app.init().await;

    assert!(app.view().shows_retry());
    assert!(app.view().snapshot().weather.text().contains(ERROR_MESSAGE));

    app.shutdown().await;
}

#[tokio::test]
async fn test_retry_builds_fresh_app_that_fetches_again() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let mut app = App::new(&config);
    app.init().await;
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    assert!(app.restart_requested);

    app.shutdown().await;
    let mut app = App::new(&config);
    app.init().await;

    assert!(app.view().snapshot().weather.text().contains("Cloudy"));
    assert!(!app.restart_requested);

    app.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_right_after_init_cancels_fade() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let mut app = App::new(&config_for(&mock_server));
    app.init().await;
    assert!(app.view().has_pending_hide());

    app.shutdown().await;

    assert!(!app.view().has_pending_hide());
    assert!(!app.is_clock_running());
}
