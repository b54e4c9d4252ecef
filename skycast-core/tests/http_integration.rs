//! HTTP behaviour of the geocoder, the weather gateway and the full pipeline,
//! exercised against a wiremock server.

use std::time::Duration;

use skycast_core::{
    Config, Coordinates, Error, GeoResolver, Geocoder, LookupFailed, TransportError,
    WeatherGateway, WeatherService, WeatherSource, parse_forecast,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

fn config_for(server: &MockServer) -> Config {
    let mut cfg = Config::default();
    cfg.endpoints.geocode_url = format!("{}/search", server.uri());
    cfg.endpoints.current_url = format!("{}/data/2.5/weather", server.uri());
    cfg.endpoints.forecast_url = format!("{}/data/2.5/forecast", server.uri());
    cfg.timeout_secs = 1;
    cfg.set_api_key(KEY.to_string());
    cfg
}

fn forecast_json() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "list": [
            {"dt_txt": "2024-01-01 21:00:00", "main": {"temp": 275.0}, "wind": {"speed": 3.0}, "weather": [{"icon": "04n"}]},
            {"dt_txt": "2024-01-02 00:00:00", "main": {"temp": 274.0}, "wind": {"speed": 2.5}, "weather": [{"icon": "10n"}], "rain": {"3h": 0.8}}
        ]
    })
}

fn current_json() -> serde_json::Value {
    serde_json::json!({
        "dt": 1_704_135_600,
        "main": {"temp": 275.5},
        "wind": {"speed": 3.3},
        "weather": [{"icon": "04n"}]
    })
}

#[tokio::test]
async fn resolve_sends_encoded_query_and_takes_first_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Tampere, Finland"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "61.4980214", "lon": "23.7603118", "display_name": "Tampere"},
            {"lat": "61.0", "lon": "24.0", "display_name": "Tampere sub-region"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = GeoResolver::new(&config_for(&server)).unwrap();
    let coords = resolver.resolve("Tampere, Finland").await.unwrap();

    assert_eq!(
        coords,
        Some(Coordinates {
            latitude: 61.4980214,
            longitude: 23.7603118
        })
    );
}

#[tokio::test]
async fn resolve_empty_result_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let resolver = GeoResolver::new(&config_for(&server)).unwrap();

    assert_eq!(resolver.resolve("Nowhere-at-all").await.unwrap(), None);
}

#[tokio::test]
async fn resolve_server_error_is_lookup_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let resolver = GeoResolver::new(&config_for(&server)).unwrap();
    let err = resolver.resolve("Tampere").await.unwrap_err();

    assert!(matches!(
        err,
        LookupFailed::Transport(TransportError::Status { .. })
    ));
}

#[tokio::test]
async fn resolve_malformed_body_is_lookup_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let resolver = GeoResolver::new(&config_for(&server)).unwrap();
    let err = resolver.resolve("Tampere").await.unwrap_err();

    assert!(matches!(err, LookupFailed::Parse(_)));
}

#[tokio::test]
async fn gateway_passes_coordinates_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "61.5"))
        .and(query_param("lon", "23.75"))
        .and(query_param("appid", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_json()))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = WeatherGateway::new(&config_for(&server)).unwrap();
    let payload = gateway
        .fetch_forecast(Coordinates {
            latitude: 61.5,
            longitude: 23.75,
        })
        .await
        .unwrap();

    let entries = parse_forecast(&payload).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].rain_mm, 0.8);
}

#[tokio::test]
async fn gateway_status_error_does_not_leak_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#))
        .mount(&server)
        .await;

    let gateway = WeatherGateway::new(&config_for(&server)).unwrap();
    let err = gateway
        .fetch_current(Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        })
        .await
        .unwrap_err();

    match &err {
        TransportError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.to_string().contains(KEY));
}

#[tokio::test]
async fn gateway_times_out_on_slow_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let gateway = WeatherGateway::new(&config_for(&server)).unwrap();
    let err = gateway
        .fetch_current(Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Request { .. }));
}

#[tokio::test]
async fn service_runs_whole_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"lat": 61.5, "lon": 23.75}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_json()))
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server)).unwrap();
    let report = service.refresh("Tampere").await.unwrap();

    assert_eq!(report.current.temperature_c, 2.35);
    assert_eq!(report.daily.len(), 2);
    assert_eq!(report.daily[0].max_temperature_c, Some(1.9));
    assert_eq!(report.daily[1].representative_icon, "10n");
}

#[tokio::test]
async fn service_reports_not_found_without_weather_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json()))
        .expect(0)
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server)).unwrap();
    let err = service.refresh("Atlantis").await.unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}
