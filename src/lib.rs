//! # AIoT Dashboard
//!
//! Live dashboard for a remote AIoT sensor backend: temperature and
//! humidity charts refreshed on a timer, LED commands and a humidity
//! forecast.
//!
//! ## Modules
//!
//! - [`model`]: Readings, predictions and label time zones
//! - [`api`]: Wire types, errors and the HTTP client for the backend
//! - [`chart`]: Chart frames, widgets and plot geometry
//! - [`dashboard`]: The context that owns both charts and the view status
//! - [`feedback`]: Messages shown after commands and failed fetches
//! - [`refresh`]: Periodic fetch-then-render timer
//! - [`render`]: Text rendering for the terminal
//! - [`config`]: TOML + environment configuration
//!
//! Everything except `model`, `api` (minus the client), `chart` and `feedback` needs the
//! default `client` feature.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aiot_dashboard::api::{ClientConfig, SensorApiClient};
//! use aiot_dashboard::dashboard::{Dashboard, DashboardOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SensorApiClient::new(ClientConfig::default())?;
//!     let mut dashboard = Dashboard::new(client, DashboardOptions::default());
//!
//!     let points = dashboard.refresh().await?;
//!     println!("Rendered {} readings", points);
//!
//!     if let Some(charts) = dashboard.charts() {
//!         println!("{:?}", charts.temperature().state().latest());
//!     }
//!
//!     println!("{}", dashboard.request_prediction().await?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod feedback;
pub mod model;

#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod dashboard;
#[cfg(feature = "client")]
pub mod refresh;
#[cfg(feature = "client")]
pub mod render;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, LedCommand, ReadingRecord};
pub use chart::{ChartError, ChartFrame, ChartState, ChartWidget, DashboardCharts, ReadingOrder};
pub use feedback::{failure_text, CommandFeedback, COMMAND_SENT};
pub use model::{DisplayZone, Prediction, Reading};

#[cfg(feature = "client")]
pub use api::{ClientConfig, SensorApi, SensorApiClient};

#[cfg(feature = "client")]
pub use config::{Config, ConfigError, LoadReport, LoggingConfig};

#[cfg(feature = "client")]
pub use dashboard::{Dashboard, DashboardOptions, ViewStatus};

#[cfg(feature = "client")]
pub use refresh::{RefreshReport, RefreshTimer};
