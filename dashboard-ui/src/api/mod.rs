//! Sensor API access from the browser

mod client;

pub use client::{fetch_prediction, fetch_readings, get_api_base, send_led_command, set_api_base};
