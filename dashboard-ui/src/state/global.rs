//! Global Application State
//!
//! Reactive state management using Leptos signals.

use aiot_dashboard::chart::ChartFrame;
use aiot_dashboard::{
    failure_text, ApiError, DashboardCharts, DisplayZone, Prediction, ReadingOrder,
};
use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Both chart widgets, created by the first successful fetch
    pub charts: RwSignal<Option<DashboardCharts>>,
    /// Last forecast, if one was requested
    pub prediction: RwSignal<Option<Prediction>>,
    /// Wall-clock time of the last successful refresh (ms since epoch)
    pub last_sync: RwSignal<Option<i64>>,
    /// Message of the last failed refresh, cleared on success
    pub fetch_error: RwSignal<Option<String>>,
    /// A readings fetch is in flight
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    pub order: ReadingOrder,
    pub zone: DisplayZone,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    provide_context(GlobalState::new());
}

impl GlobalState {
    /// Fresh state: no charts yet, nothing loading
    pub fn new() -> Self {
        Self {
            charts: create_rw_signal(None),
            prediction: create_rw_signal(None),
            last_sync: create_rw_signal(None),
            fetch_error: create_rw_signal(None),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
            order: ReadingOrder::default(),
            zone: DisplayZone::Local,
        }
    }

    /// Render a readings frame: the first one creates the charts, later
    /// ones replace their data in place
    pub fn apply_frame(&self, frame: ChartFrame) {
        self.charts.update(|charts| match charts {
            Some(charts) => charts.refresh(frame),
            None => *charts = Some(DashboardCharts::init(frame)),
        });
        self.fetch_error.set(None);
        self.last_sync.set(Some(chrono::Utc::now().timestamp_millis()));
    }

    /// Record a failed refresh; charts keep their previous data
    pub fn apply_fetch_error(&self, err: &ApiError) {
        let message = failure_text(err);
        logging::error!("{}", message);
        self.fetch_error.set(Some(message));
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}
