//! Data Transfer Objects
//!
//! Request and response types for the sensor API wire format. Field names
//! follow the backend's JSON keys.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::error::ApiResult;
use crate::model::{DisplayZone, Prediction, Reading};

// ============================================
// Readings
// ============================================

/// One row of `GET /api/data`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReadingRecord {
    /// ISO-8601, usually without an offset
    pub fecha: String,
    pub temperatura: f64,
    pub humedad: f64,
}

impl ReadingRecord {
    /// Convert into a `Reading`, interpreting naive timestamps in `zone`
    pub fn into_reading(self, zone: DisplayZone) -> ApiResult<Reading> {
        let timestamp = zone.parse_timestamp(&self.fecha)?;
        Ok(Reading::new(timestamp, self.temperatura, self.humedad))
    }
}

/// Convert a whole response body, preserving the server's order
pub fn records_to_readings(
    records: Vec<ReadingRecord>,
    zone: DisplayZone,
) -> ApiResult<Vec<Reading>> {
    records
        .into_iter()
        .map(|record| record.into_reading(zone))
        .collect()
}

/// Body of `POST /api/data`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewReading {
    pub temperatura: f64,
    pub humedad: f64,
}

impl NewReading {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperatura: temperature,
            humedad: humidity,
        }
    }
}

/// Acknowledgement returned by `POST /api/data`
#[derive(Debug, Clone, Deserialize)]
pub struct IngestAck {
    pub status: String,
}

impl IngestAck {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// ============================================
// Prediction
// ============================================

/// Body of `GET /api/predict`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PredictionResponse {
    pub predicted_humidity_10_steps: f64,
}

impl From<PredictionResponse> for Prediction {
    fn from(resp: PredictionResponse) -> Self {
        Prediction::new(resp.predicted_humidity_10_steps)
    }
}

// ============================================
// LED command
// ============================================

/// Body of `POST /api/led`
///
/// Serializes to a single-key object with the channel as key:
/// `{"led1": true}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedCommand {
    pub channel: String,
    pub state: bool,
}

impl LedCommand {
    pub fn new(channel: impl Into<String>, state: bool) -> Self {
        Self {
            channel: channel.into(),
            state,
        }
    }
}

impl Serialize for LedCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.channel, &self.state)?;
        map.end()
    }
}
