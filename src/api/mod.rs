//! Sensor API
//!
//! Client side of the remote AIoT backend.
//!
//! # Endpoints
//!
//! - `GET /api/data` - Sensor history, newest first
//! - `POST /api/data` - Submit a reading
//! - `GET /api/predict` - Humidity forecast ten steps ahead
//! - `POST /api/led` - Switch an LED channel (`{"led1": true}`)
//! - `GET /` - Plain-text liveness banner
//!
//! The wire types and errors are always available; the reqwest client is
//! behind the `client` feature so the browser crate can share the rest.

#[cfg(feature = "client")]
pub mod client;
pub mod dto;
pub mod error;

#[cfg(feature = "client")]
pub use client::{ClientConfig, SensorApi, SensorApiClient};
pub use dto::{IngestAck, LedCommand, NewReading, PredictionResponse, ReadingRecord};
pub use error::{ApiError, ApiResult};

/// Public backend the dashboard was built against
pub const DEFAULT_BASE_URL: &str = "https://aiot-backend-9r32.onrender.com";

pub const READINGS_PATH: &str = "/api/data";
pub const PREDICT_PATH: &str = "/api/predict";
pub const LED_PATH: &str = "/api/led";
pub const HEALTH_PATH: &str = "/";
