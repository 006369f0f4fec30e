//! UI Components

pub mod chart;
pub mod led_controls;
pub mod prediction;
pub mod toast;

pub use chart::Chart;
pub use led_controls::LedControls;
pub use prediction::PredictionPanel;
pub use toast::Toast;
