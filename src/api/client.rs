//! Sensor REST API Client
//!
//! HTTP client for the remote AIoT backend: sensor history, humidity
//! prediction, LED commands, reading submission and health.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{
    records_to_readings, IngestAck, LedCommand, NewReading, PredictionResponse, ReadingRecord,
};
use super::error::{ApiError, ApiResult};
use super::{DEFAULT_BASE_URL, HEALTH_PATH, LED_PATH, PREDICT_PATH, READINGS_PATH};
use crate::model::{DisplayZone, Prediction, Reading};

/// Operations the dashboard needs from the sensor backend
#[async_trait]
pub trait SensorApi: Send + Sync {
    /// Sensor history in the order the server returns it
    async fn fetch_readings(&self) -> ApiResult<Vec<Reading>>;

    /// Humidity forecast
    async fn fetch_prediction(&self) -> ApiResult<Prediction>;

    /// Switch a named LED channel on or off
    async fn send_led_command(&self, channel: &str, state: bool) -> ApiResult<()>;
}

/// Configuration for the sensor API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without trailing slash (e.g., "https://aiot-backend.example.com")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Zone naive `fecha` values are interpreted in
    pub zone: DisplayZone,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
            zone: DisplayZone::Local,
        }
    }
}

/// reqwest-backed implementation of [`SensorApi`]
#[derive(Debug, Clone)]
pub struct SensorApiClient {
    client: Client,
    config: ClientConfig,
}

impl SensorApiClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: ClientConfig) -> ApiResult<Self> {
        let base = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(config.base_url));
        }
        config.base_url = base;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Check that the backend answers on `/`
    pub async fn health_check(&self) -> ApiResult<String> {
        let url = self.url(HEALTH_PATH);
        tracing::debug!(%url, "health check");

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Submit a reading the way a sensor node would
    pub async fn submit_reading(&self, reading: NewReading) -> ApiResult<IngestAck> {
        let url = self.url(READINGS_PATH);
        tracing::debug!(%url, ?reading, "submitting reading");

        let response = self.client.post(&url).json(&reading).send().await?;
        let response = ensure_success(response).await?;
        decode(response).await
    }
}

#[async_trait]
impl SensorApi for SensorApiClient {
    async fn fetch_readings(&self) -> ApiResult<Vec<Reading>> {
        let url = self.url(READINGS_PATH);
        tracing::debug!(%url, "fetching readings");

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response).await?;
        let records: Vec<ReadingRecord> = decode(response).await?;

        records_to_readings(records, self.config.zone)
    }

    async fn fetch_prediction(&self) -> ApiResult<Prediction> {
        let url = self.url(PREDICT_PATH);
        tracing::debug!(%url, "fetching prediction");

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response).await?;
        let body: PredictionResponse = decode(response).await?;

        Ok(body.into())
    }

    async fn send_led_command(&self, channel: &str, state: bool) -> ApiResult<()> {
        let url = self.url(LED_PATH);
        let command = LedCommand::new(channel, state);
        tracing::debug!(%url, channel, state, "sending LED command");

        let response = self.client.post(&url).json(&command).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ApiError::Status`
async fn ensure_success(response: Response) -> ApiResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
