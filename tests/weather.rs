use farmlok::configuration::WeatherSettings;
use farmlok::connectors::{ConnectorError, OpenWeatherClient, WeatherConnector};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(base_url: String) -> WeatherSettings {
    WeatherSettings {
        base_url,
        api_key: "test-key".to_string(),
        timeout_seconds: 5,
    }
}

#[tokio::test]
async fn passes_provider_payload_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Delhi"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Delhi",
            "main": { "temp": 31.2 }
        })))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&settings(server.uri())).expect("client");

    let data = client.current_by_city("Delhi").await.expect("weather data");
    assert_eq!(data["name"], "Delhi");
    assert_eq!(data["main"]["temp"], 31.2);
}

#[tokio::test]
async fn retries_transient_server_errors() {
    let server = MockServer::start().await;

    // the first two answers fail, the third succeeds
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Noida"
        })))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&settings(server.uri())).expect("client");

    let data = client.current_by_city("Noida").await.expect("weather data");
    assert_eq!(data["name"], "Noida");
}

#[tokio::test]
async fn invalid_api_key_maps_to_service_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&settings(server.uri())).expect("client");

    let err = client.current_by_city("Delhi").await.unwrap_err();
    match err {
        ConnectorError::ServiceUnavailable(msg) => {
            assert_eq!(msg, "Invalid weather API key");
        }
        other => panic!("expected ServiceUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_city_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&settings(server.uri())).expect("client");

    let err = client.current_by_city("Atlantis").await.unwrap_err();
    assert!(matches!(err, ConnectorError::NotFound(_)));
}
