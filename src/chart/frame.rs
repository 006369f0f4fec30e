//! Chart frames
//!
//! A frame is the set of parallel arrays (labels, temperatures, humidities)
//! built from one batch of readings, already in display order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::widget::ChartError;
use crate::model::{DisplayZone, Reading};

/// How the API orders the readings it returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingOrder {
    /// Newest first; the batch is reversed for display
    #[default]
    NewestFirst,
    /// Already chronological; kept as received
    OldestFirst,
    /// Ignore the server's order and sort by timestamp
    ByTimestamp,
}

impl ReadingOrder {
    /// Arrange `readings` oldest-first for charting
    pub fn arrange(&self, readings: &[Reading]) -> Vec<Reading> {
        let mut arranged = readings.to_vec();
        match self {
            ReadingOrder::NewestFirst => arranged.reverse(),
            ReadingOrder::OldestFirst => {}
            ReadingOrder::ByTimestamp => arranged.sort_by_key(|r| r.timestamp),
        }
        arranged
    }
}

impl FromStr for ReadingOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest-first" => Ok(ReadingOrder::NewestFirst),
            "oldest-first" => Ok(ReadingOrder::OldestFirst),
            "by-timestamp" => Ok(ReadingOrder::ByTimestamp),
            other => Err(format!("unknown reading order: {}", other)),
        }
    }
}

impl fmt::Display for ReadingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReadingOrder::NewestFirst => "newest-first",
            ReadingOrder::OldestFirst => "oldest-first",
            ReadingOrder::ByTimestamp => "by-timestamp",
        };
        f.write_str(s)
    }
}

/// Parallel chart arrays of equal length
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartFrame {
    labels: Vec<String>,
    temperatures: Vec<f64>,
    humidities: Vec<f64>,
}

impl ChartFrame {
    pub fn new(
        labels: Vec<String>,
        temperatures: Vec<f64>,
        humidities: Vec<f64>,
    ) -> Result<Self, ChartError> {
        if labels.len() != temperatures.len() {
            return Err(ChartError::LengthMismatch {
                labels: labels.len(),
                values: temperatures.len(),
            });
        }
        if labels.len() != humidities.len() {
            return Err(ChartError::LengthMismatch {
                labels: labels.len(),
                values: humidities.len(),
            });
        }

        Ok(Self {
            labels,
            temperatures,
            humidities,
        })
    }

    /// Build a frame from a batch of readings as returned by the API
    pub fn from_readings(readings: &[Reading], order: ReadingOrder, zone: DisplayZone) -> Self {
        let arranged = order.arrange(readings);

        Self {
            labels: arranged.iter().map(|r| r.label(zone)).collect(),
            temperatures: arranged.iter().map(|r| r.temperature).collect(),
            humidities: arranged.iter().map(|r| r.humidity).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn humidities(&self) -> &[f64] {
        &self.humidities
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<f64>, Vec<f64>) {
        (self.labels, self.temperatures, self.humidities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(secs: u32, temperature: f64, humidity: f64) -> Reading {
        Reading::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, secs).unwrap(),
            temperature,
            humidity,
        )
    }

    #[test]
    fn test_frame_reverses_received_order() {
        // Order exactly as the API delivered it
        let received = vec![reading(0, 20.0, 50.0), reading(30, 21.0, 52.0)];

        let frame = ChartFrame::from_readings(&received, ReadingOrder::NewestFirst, DisplayZone::Utc);

        assert_eq!(frame.labels(), &["00:00:30", "00:00:00"]);
        assert_eq!(frame.temperatures(), &[21.0, 20.0]);
        assert_eq!(frame.humidities(), &[52.0, 50.0]);
    }

    #[test]
    fn test_frame_length_matches_input() {
        let received: Vec<Reading> = (0..50)
            .map(|i| reading(59 - i, 20.0 + i as f64, 40.0))
            .collect();

        let frame = ChartFrame::from_readings(&received, ReadingOrder::NewestFirst, DisplayZone::Utc);

        assert_eq!(frame.len(), 50);
        assert_eq!(frame.temperatures().first(), Some(&69.0));
        assert_eq!(frame.labels().first().map(String::as_str), Some("00:00:10"));
        assert_eq!(frame.labels().last().map(String::as_str), Some("00:00:59"));
    }

    #[test]
    fn test_oldest_first_keeps_order() {
        let received = vec![reading(0, 20.0, 50.0), reading(30, 21.0, 52.0)];
        let frame = ChartFrame::from_readings(&received, ReadingOrder::OldestFirst, DisplayZone::Utc);
        assert_eq!(frame.temperatures(), &[20.0, 21.0]);
    }

    #[test]
    fn test_by_timestamp_ignores_server_order() {
        let received = vec![reading(30, 21.0, 52.0), reading(0, 20.0, 50.0), reading(15, 19.0, 51.0)];
        let frame = ChartFrame::from_readings(&received, ReadingOrder::ByTimestamp, DisplayZone::Utc);
        assert_eq!(frame.labels(), &["00:00:00", "00:00:15", "00:00:30"]);
    }

    #[test]
    fn test_empty_batch() {
        let frame = ChartFrame::from_readings(&[], ReadingOrder::NewestFirst, DisplayZone::Utc);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_new_checks_all_lengths() {
        assert!(ChartFrame::new(vec!["a".into()], vec![1.0], vec![]).is_err());
        assert!(ChartFrame::new(vec!["a".into()], vec![1.0], vec![2.0]).is_ok());
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!("by-timestamp".parse::<ReadingOrder>().unwrap(), ReadingOrder::ByTimestamp);
        assert_eq!(ReadingOrder::default().to_string(), "newest-first");
        assert!("random".parse::<ReadingOrder>().is_err());
    }
}
