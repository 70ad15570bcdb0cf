//! Integration tests for OpenWeatherClient using wiremock.

use skycast_weather::{FetchError, OpenWeatherClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body(temp: f64) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": temp, "feels_like": 14.6, "temp_min": 13.9, "temp_max": 16.2, "pressure": 1012, "humidity": 81},
        "visibility": 10000,
        "wind": {"speed": 4.63, "deg": 240},
        "clouds": {"all": 75},
        "dt": 1_700_000_000,
        "sys": {"country": "GB", "sunrise": 1_699_989_000, "sunset": 1_700_021_000},
        "timezone": 0,
        "name": "London",
        "cod": 200
    })
}

fn forecast_body(samples: usize) -> serde_json::Value {
    let list: Vec<_> = (0..samples)
        .map(|i| {
            serde_json::json!({
                "dt": 1_700_006_400 + (i as i64) * 10_800,
                "main": {"temp": 10.0 + i as f64 * 0.1},
                "weather": [{"description": "scattered clouds", "icon": "03d"}]
            })
        })
        .collect();
    serde_json::json!({
        "cod": "200",
        "message": 0,
        "cnt": samples,
        "list": list,
        "city": {"name": "London", "country": "GB", "timezone": 3600}
    })
}

async fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new(&server.uri(), Some("test-key".to_string()), None).unwrap()
}

#[tokio::test]
async fn test_fetch_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(15.3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(40)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let report = client.fetch_weather("London").await.unwrap();

    assert_eq!(report.current.name, "London");
    assert_eq!(report.current.country, "GB");
    assert!((report.current.temperature - 15.3).abs() < 1e-9);
    assert_eq!(report.current.humidity, 81);
    assert_eq!(report.current.pressure, 1012);
    assert_eq!(report.current.visibility, 10000);
    assert_eq!(report.current.cloudiness, 75);
    assert_eq!(report.current.icon.as_str(), "10d");
    assert_eq!(report.current.description, "light rain");
    assert_eq!(report.forecast.len(), 40);
    assert!(report.forecast.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[tokio::test]
async fn test_city_not_found_skips_forecast() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(40)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.fetch_weather("Nonexistentville").await.unwrap_err();

    match err {
        FetchError::Api { code, message } => {
            assert_eq!(code, 404);
            assert_eq!(message, "city not found");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_key_message_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.fetch_weather("London").await.unwrap_err();
    assert!(matches!(err, FetchError::Api { code: 401, ref message } if message.starts_with("Invalid API key")));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.fetch_weather("London").await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_forecast_failure_after_current_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(15.3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"cod": "200"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.fetch_weather("London").await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_short_forecast_is_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(-2.5)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(3)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let report = client.fetch_weather("London").await.unwrap();
    assert_eq!(report.forecast.len(), 3);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = OpenWeatherClient::new("http://127.0.0.1:1", None, None).unwrap();
    let err = client.fetch_weather("London").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
