//! Chart widgets
//!
//! A widget is a line chart bound to one display surface. It owns its
//! label/value sequences and replaces them wholesale on every refresh.

use serde::Serialize;
use thiserror::Error;

use super::frame::ChartFrame;

/// Errors raised when building chart data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// Labels and values must correspond index-wise
    #[error("Length mismatch: {labels} labels for {values} values")]
    LengthMismatch { labels: usize, values: usize },
}

/// Labels and values of a single line series
///
/// `labels.len() == values.len()` always holds; the only mutators take both
/// sequences together and check them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartState {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartState {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self, ChartError> {
        check_lengths(labels.len(), values.len())?;
        Ok(Self { labels, values })
    }

    /// Replace both sequences, dropping the previous data
    pub fn replace(&mut self, labels: Vec<String>, values: Vec<f64>) -> Result<(), ChartError> {
        check_lengths(labels.len(), values.len())?;
        self.labels = labels;
        self.values = values;
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(label, value)` pairs in display order
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Right-most point of the chart
    pub fn latest(&self) -> Option<(&str, f64)> {
        self.points().last()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }
}

fn check_lengths(labels: usize, values: usize) -> Result<(), ChartError> {
    if labels == values {
        Ok(())
    } else {
        Err(ChartError::LengthMismatch { labels, values })
    }
}

/// Static presentation of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    /// Identifier of the display surface (canvas element id)
    pub surface_id: &'static str,
    /// Dataset label shown in the legend
    pub title: &'static str,
    /// CSS color of the line
    pub color: &'static str,
    pub unit: &'static str,
}

pub const TEMPERATURE_CHART: ChartSpec = ChartSpec {
    surface_id: "tempChart",
    title: "Temperatura (°C)",
    color: "red",
    unit: "°C",
};

pub const HUMIDITY_CHART: ChartSpec = ChartSpec {
    surface_id: "humChart",
    title: "Humedad (%)",
    color: "blue",
    unit: "%",
};

/// A line chart bound to a display surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartWidget {
    spec: ChartSpec,
    state: ChartState,
    /// Bumped on every data replacement; renderers redraw when it changes
    revision: u64,
}

impl ChartWidget {
    pub fn new(spec: ChartSpec, state: ChartState) -> Self {
        Self {
            spec,
            state,
            revision: 0,
        }
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the data and request a redraw
    pub fn update(&mut self, labels: Vec<String>, values: Vec<f64>) -> Result<(), ChartError> {
        self.state.replace(labels, values)?;
        self.revision += 1;
        Ok(())
    }
}

/// The temperature and humidity charts of the dashboard
///
/// Only [`DashboardCharts::init`] creates the pair, so a refresh can never
/// target charts that do not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    temperature: ChartWidget,
    humidity: ChartWidget,
}

impl DashboardCharts {
    /// Create both widgets from the first frame
    pub fn init(frame: ChartFrame) -> Self {
        let (labels, temperatures, humidities) = frame.into_parts();

        // ChartFrame guarantees equal lengths
        let temperature = ChartState {
            labels: labels.clone(),
            values: temperatures,
        };
        let humidity = ChartState {
            labels,
            values: humidities,
        };

        Self {
            temperature: ChartWidget::new(TEMPERATURE_CHART, temperature),
            humidity: ChartWidget::new(HUMIDITY_CHART, humidity),
        }
    }

    /// Replace both widgets' data and request a redraw of each
    pub fn refresh(&mut self, frame: ChartFrame) {
        let (labels, temperatures, humidities) = frame.into_parts();

        self.temperature.state = ChartState {
            labels: labels.clone(),
            values: temperatures,
        };
        self.temperature.revision += 1;

        self.humidity.state = ChartState {
            labels,
            values: humidities,
        };
        self.humidity.revision += 1;
    }

    pub fn temperature(&self) -> &ChartWidget {
        &self.temperature
    }

    pub fn humidity(&self) -> &ChartWidget {
        &self.humidity
    }

    /// Both widgets, temperature first
    pub fn widgets(&self) -> [&ChartWidget; 2] {
        [&self.temperature, &self.humidity]
    }
}
