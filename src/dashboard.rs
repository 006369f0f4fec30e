//! Dashboard Context
//!
//! The single object that owns everything the dashboard shows: both chart
//! widgets, the last prediction and the view status. Operations thread a
//! `Result` from the API all the way to the rendered state, so a failed
//! fetch becomes a visible error instead of a silently stale chart.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiResult, SensorApi};
use crate::chart::{ChartFrame, DashboardCharts, ReadingOrder};
use crate::feedback::{failure_text, CommandFeedback};
use crate::model::{DisplayZone, Prediction, Reading};

/// How readings are turned into chart frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardOptions {
    pub order: ReadingOrder,
    pub zone: DisplayZone,
}

/// What the dashboard is currently showing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewStatus {
    /// No fetch has completed yet
    Loading,
    /// Charts reflect the last successful fetch
    Ready {
        updated_at: DateTime<Utc>,
        points: usize,
    },
    /// The last fetch failed; charts still show older data, if any
    Failed {
        message: String,
        at: DateTime<Utc>,
    },
}

impl ViewStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ViewStatus::Failed { .. })
    }
}

/// Owning context for the dashboard
pub struct Dashboard<A: SensorApi> {
    api: Arc<A>,
    options: DashboardOptions,
    charts: Option<DashboardCharts>,
    prediction: Option<Prediction>,
    status: ViewStatus,
}

impl<A: SensorApi> Dashboard<A> {
    pub fn new(api: A, options: DashboardOptions) -> Self {
        Self::with_shared_api(Arc::new(api), options)
    }

    pub fn with_shared_api(api: Arc<A>, options: DashboardOptions) -> Self {
        Self {
            api,
            options,
            charts: None,
            prediction: None,
            status: ViewStatus::Loading,
        }
    }

    /// Handle to the API, for fetching without holding a lock on the dashboard
    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// Chart pair, once the first fetch has succeeded
    pub fn charts(&self) -> Option<&DashboardCharts> {
        self.charts.as_ref()
    }

    pub fn prediction(&self) -> Option<Prediction> {
        self.prediction
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Fetch readings and render them
    pub async fn refresh(&mut self) -> ApiResult<usize> {
        let result = self.api.fetch_readings().await;
        self.apply_readings(result)
    }

    /// Render the outcome of a readings fetch
    ///
    /// The first successful batch creates the charts; later ones replace
    /// their data. On failure the charts are left untouched and the status
    /// switches to `Failed`.
    pub fn apply_readings(&mut self, result: ApiResult<Vec<Reading>>) -> ApiResult<usize> {
        match result {
            Ok(readings) => {
                let frame = ChartFrame::from_readings(&readings, self.options.order, self.options.zone);
                let points = frame.len();

                match self.charts.as_mut() {
                    Some(charts) => charts.refresh(frame),
                    None => self.charts = Some(DashboardCharts::init(frame)),
                }

                self.status = ViewStatus::Ready {
                    updated_at: Utc::now(),
                    points,
                };
                tracing::info!(points, "charts refreshed");
                Ok(points)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to refresh readings");
                self.status = ViewStatus::Failed {
                    message: failure_text(&e),
                    at: Utc::now(),
                };
                Err(e)
            }
        }
    }

    /// Fetch the humidity forecast and return the text to display
    pub async fn request_prediction(&mut self) -> ApiResult<String> {
        let result = self.api.fetch_prediction().await;
        self.apply_prediction(result)
    }

    /// Store a prediction result; the previous value survives a failure
    pub fn apply_prediction(&mut self, result: ApiResult<Prediction>) -> ApiResult<String> {
        match result {
            Ok(prediction) => {
                tracing::info!(humidity = prediction.humidity, "prediction received");
                self.prediction = Some(prediction);
                Ok(prediction.display_text())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch prediction");
                Err(e)
            }
        }
    }

    /// Send an LED command and report how it went
    pub async fn toggle_led(&self, channel: &str, state: bool) -> CommandFeedback {
        let result = self.api.send_led_command(channel, state).await;
        if let Err(e) = &result {
            tracing::warn!(channel, state, error = %e, "LED command failed");
        } else {
            tracing::info!(channel, state, "LED command sent");
        }
        CommandFeedback::from_result(channel, state, &result)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;

    /// In-memory [`SensorApi`] with scripted responses
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub readings: Mutex<Vec<ApiResult<Vec<Reading>>>>,
        pub prediction: Mutex<Option<ApiResult<Prediction>>>,
        pub led_result: Mutex<Option<ApiResult<()>>>,
        pub commands: Mutex<Vec<(String, bool)>>,
    }

    impl FakeApi {
        pub(crate) fn with_batches(batches: Vec<ApiResult<Vec<Reading>>>) -> Self {
            Self {
                readings: Mutex::new(batches),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl SensorApi for FakeApi {
        async fn fetch_readings(&self) -> ApiResult<Vec<Reading>> {
            let mut batches = self.readings.lock().unwrap();
            if batches.is_empty() {
                Err(ApiError::Unavailable)
            } else {
                batches.remove(0)
            }
        }

        async fn fetch_prediction(&self) -> ApiResult<Prediction> {
            self.prediction
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(Err(ApiError::Unavailable))
        }

        async fn send_led_command(&self, channel: &str, state: bool) -> ApiResult<()> {
            self.commands
                .lock()
                .unwrap()
                .push((channel.to_string(), state));
            self.led_result.lock().unwrap().clone().unwrap_or(Ok(()))
        }
    }

    /// `count` readings, newest first, 30 s apart
    pub(crate) fn batch(count: usize, base_temp: f64) -> Vec<Reading> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        (0..count)
            .rev()
            .map(|i| {
                Reading::new(
                    start + Duration::seconds(30 * i as i64),
                    base_temp + i as f64,
                    50.0 + i as f64,
                )
            })
            .collect()
    }

    fn options() -> DashboardOptions {
        DashboardOptions {
            order: ReadingOrder::NewestFirst,
            zone: DisplayZone::Utc,
        }
    }

    #[tokio::test]
    async fn test_first_refresh_initializes_charts() {
        let api = FakeApi::with_batches(vec![Ok(batch(3, 20.0))]);
        let mut dashboard = Dashboard::new(api, options());
        assert!(dashboard.charts().is_none());
        assert_eq!(dashboard.status(), &ViewStatus::Loading);

        let points = dashboard.refresh().await.unwrap();

        assert_eq!(points, 3);
        let charts = dashboard.charts().unwrap();
        assert_eq!(
            charts.temperature().state().labels(),
            &["12:00:00", "12:00:30", "12:01:00"]
        );
        assert_eq!(charts.temperature().state().values(), &[20.0, 21.0, 22.0]);
        assert_eq!(charts.humidity().state().values(), &[50.0, 51.0, 52.0]);
        assert!(matches!(dashboard.status(), ViewStatus::Ready { points: 3, .. }));
    }

    #[tokio::test]
    async fn test_later_refresh_replaces_data() {
        let api = FakeApi::with_batches(vec![Ok(batch(3, 20.0)), Ok(batch(2, 30.0))]);
        let mut dashboard = Dashboard::new(api, options());

        dashboard.refresh().await.unwrap();
        dashboard.refresh().await.unwrap();

        let charts = dashboard.charts().unwrap();
        assert_eq!(charts.temperature().state().values(), &[30.0, 31.0]);
        assert_eq!(charts.temperature().revision(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_charts_and_reports() {
        let api = FakeApi::with_batches(vec![
            Ok(batch(2, 20.0)),
            Err(ApiError::Decode("expected value".to_string())),
        ]);
        let mut dashboard = Dashboard::new(api, options());

        dashboard.refresh().await.unwrap();
        let err = dashboard.refresh().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
        match dashboard.status() {
            ViewStatus::Failed { message, .. } => assert!(message.contains("expected value")),
            other => panic!("unexpected status {:?}", other),
        }
        assert_eq!(
            dashboard.charts().unwrap().temperature().state().values(),
            &[20.0, 21.0]
        );
    }

    #[tokio::test]
    async fn test_failure_before_first_load() {
        let mut dashboard = Dashboard::new(FakeApi::default(), options());
        assert!(dashboard.refresh().await.is_err());
        assert!(dashboard.status().is_failed());
        assert!(dashboard.charts().is_none());
    }

    #[tokio::test]
    async fn test_prediction_text() {
        let api = FakeApi::default();
        *api.prediction.lock().unwrap() = Some(Ok(Prediction::new(63.5)));
        let mut dashboard = Dashboard::new(api, options());

        let text = dashboard.request_prediction().await.unwrap();

        assert_eq!(text, "Predicción futura de humedad: 63.5");
        assert_eq!(dashboard.prediction(), Some(Prediction::new(63.5)));
    }

    #[tokio::test]
    async fn test_prediction_failure_keeps_previous() {
        let mut dashboard = Dashboard::new(FakeApi::default(), options());
        dashboard
            .apply_prediction(Ok(Prediction::new(40.0)))
            .unwrap();

        assert!(dashboard.request_prediction().await.is_err());
        assert_eq!(dashboard.prediction(), Some(Prediction::new(40.0)));
    }

    #[tokio::test]
    async fn test_led_feedback_reflects_status() {
        let api = Arc::new(FakeApi::default());
        let dashboard = Dashboard::with_shared_api(Arc::clone(&api), options());

        let ok = dashboard.toggle_led("led1", true).await;
        assert!(ok.success);
        assert_eq!(ok.message, "Comando enviado");

        *api.led_result.lock().unwrap() = Some(Err(ApiError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        }));
        let failed = dashboard.toggle_led("led2", false).await;
        assert!(!failed.success);
        assert_eq!(
            failed.message,
            "Error al enviar comando: API error 502: bad gateway"
        );

        assert_eq!(
            api.commands.lock().unwrap().as_slice(),
            &[("led1".to_string(), true), ("led2".to_string(), false)]
        );
    }
}
