//! AIoT Dashboard
//!
//! Browser front end for the AIoT sensor backend, built with Leptos (WASM).
//!
//! # Features
//!
//! - Temperature and humidity line charts, refreshed every 30 seconds
//! - LED on/off commands
//! - Humidity forecast on demand
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! Chart state, wire types and plot geometry come from the `aiot-dashboard`
//! crate built without its native `client` feature.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
