use super::errors::ConnectorError;
use crate::configuration::WeatherSettings;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

// Transient failures get retried this many times on top of the first try.
const MAX_RETRIES: u32 = 3;

#[async_trait]
pub trait WeatherConnector: Send + Sync {
    async fn current_by_city(&self, city: &str) -> Result<Value, ConnectorError>;
}

/// Proxy to the OpenWeather "current weather" endpoint. The provider's JSON
/// is passed through untouched.
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(settings: &WeatherSettings) -> Result<Self, ConnectorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|err| {
                ConnectorError::Internal(format!("failed to build weather http client: {}", err))
            })?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    async fn request_weather(&self, city: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .get(format!("{}/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
    }
}

#[async_trait]
impl WeatherConnector for OpenWeatherClient {
    #[tracing::instrument(name = "Fetch weather data.", skip(self))]
    async fn current_by_city(&self, city: &str) -> Result<Value, ConnectorError> {
        let mut attempt = 0u32;

        loop {
            let result = self.request_weather(city).await;

            let transient = match &result {
                Ok(response) => response.status().is_server_error(),
                Err(err) => err.is_timeout() || err.is_connect(),
            };
            if transient && attempt < MAX_RETRIES {
                attempt += 1;
                let backoff = Duration::from_millis(100 * 2u64.pow(attempt));
                tracing::warn!(
                    "weather request failed (attempt {}), retrying in {:?}",
                    attempt,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            let response = result?;
            return match response.status() {
                status if status.is_success() => {
                    response.json::<Value>().await.map_err(|err| {
                        ConnectorError::InvalidResponse(format!(
                            "weather payload is not JSON: {}",
                            err
                        ))
                    })
                }
                StatusCode::UNAUTHORIZED => Err(ConnectorError::ServiceUnavailable(
                    "Invalid weather API key".to_string(),
                )),
                StatusCode::NOT_FOUND => Err(ConnectorError::NotFound(format!(
                    "no weather data for city {:?}",
                    city
                ))),
                status if status.is_server_error() => Err(ConnectorError::ServiceUnavailable(
                    "Failed to fetch weather data".to_string(),
                )),
                status => Err(ConnectorError::HttpError(format!(
                    "weather provider answered {}",
                    status
                ))),
            };
        }
    }
}
