//! Charts
//!
//! - [`frame`]: turning a batch of readings into display-ordered arrays
//! - [`widget`]: chart state, widgets and the dashboard's chart pair
//! - [`plot`]: scaling and projection shared by every renderer

pub mod frame;
pub mod plot;
pub mod widget;

pub use frame::{ChartFrame, ReadingOrder};
pub use plot::{Viewport, YRange};
pub use widget::{
    ChartError, ChartSpec, ChartState, ChartWidget, DashboardCharts, HUMIDITY_CHART,
    TEMPERATURE_CHART,
};
