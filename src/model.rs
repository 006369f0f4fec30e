//! Core data types for the sensor dashboard
//!
//! - `Reading`: one timestamped temperature/humidity sample
//! - `Prediction`: the humidity forecast returned by the API
//! - `DisplayZone`: which clock chart labels are rendered in

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::ApiError;

/// Prefix shown in front of the predicted humidity value
pub const PREDICTION_PREFIX: &str = "Predicción futura de humedad: ";

/// Label format used on the chart x-axis
const LABEL_FORMAT: &str = "%H:%M:%S";

/// Naive layouts the sensor backend has been seen to emit
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A single sensor sample
///
/// Immutable once received from the API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, temperature: f64, humidity: f64) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
        }
    }

    /// Time-of-day label for the chart x-axis
    pub fn label(&self, zone: DisplayZone) -> String {
        zone.format_label(&self.timestamp)
    }
}

/// Humidity forecast ten sampling steps ahead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub humidity: f64,
}

impl Prediction {
    pub fn new(humidity: f64) -> Self {
        Self { humidity }
    }

    /// Text shown in the prediction panel
    ///
    /// `f64`'s `Display` prints integral values without a fraction
    /// (`63.0` -> `63`), which matches how browsers stringify numbers.
    pub fn display_text(&self) -> String {
        format!("{}{}", PREDICTION_PREFIX, self.humidity)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Clock used to interpret naive timestamps and to render labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    /// The viewer's local time zone
    #[default]
    Local,
    Utc,
}

impl DisplayZone {
    /// Format a timestamp as `HH:MM:SS` in this zone
    pub fn format_label(&self, ts: &DateTime<Utc>) -> String {
        match self {
            DisplayZone::Local => ts.with_timezone(&Local).format(LABEL_FORMAT).to_string(),
            DisplayZone::Utc => ts.format(LABEL_FORMAT).to_string(),
        }
    }

    /// Parse an ISO-8601 timestamp from the API
    ///
    /// Strings with an offset (`Z`, `+02:00`) are absolute. Naive strings,
    /// which is what the backend emits, are read as wall-clock time in this zone.
    pub fn parse_timestamp(&self, raw: &str) -> Result<DateTime<Utc>, ApiError> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .ok_or_else(|| ApiError::InvalidTimestamp(raw.to_string()))?;

        match self {
            DisplayZone::Utc => Ok(Utc.from_utc_datetime(&naive)),
            DisplayZone::Local => resolve_local(&naive)
                .ok_or_else(|| ApiError::InvalidTimestamp(raw.to_string())),
        }
    }
}

/// Map a local wall-clock time to an instant
///
/// Ambiguous times (clocks set back) take the earlier instant. Times inside
/// a gap (clocks set forward) are moved forward past it, the way browsers
/// resolve `new Date("...")`.
fn resolve_local(naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    match Local.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => Local
            .from_local_datetime(&(*naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

impl FromStr for DisplayZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(DisplayZone::Local),
            "utc" => Ok(DisplayZone::Utc),
            other => Err(format!("unknown display zone: {}", other)),
        }
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Local => f.write_str("local"),
            DisplayZone::Utc => f.write_str("utc"),
        }
    }
}
