//! HTTP API Client
//!
//! Browser-side calls to the sensor backend. Wire types and errors come
//! from the `aiot-dashboard` crate so both front ends agree on them.

use aiot_dashboard::api::dto::records_to_readings;
use aiot_dashboard::api::{
    ApiError, ApiResult, LedCommand, PredictionResponse, ReadingRecord, DEFAULT_BASE_URL,
    LED_PATH, PREDICT_PATH, READINGS_PATH,
};
use aiot_dashboard::{DisplayZone, Prediction, Reading};
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::rc::Rc;
use web_sys::{AbortController, AbortSignal};

/// Local storage key for a user-chosen backend
const API_URL_KEY: &str = "aiot_api_url";

/// Requests still pending after this long are aborted
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_BASE_URL))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, &normalize_base(url));
        }
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn url(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

/// Aborts a request, body included, once its time is up
///
/// Dropping the deadline cancels the timer.
struct Deadline {
    controller: AbortController,
    expired: Rc<Cell<bool>>,
    _timer: Timeout,
}

impl Deadline {
    fn start(millis: u32) -> ApiResult<Self> {
        let controller = AbortController::new()
            .map_err(|e| ApiError::Network(format!("AbortController: {:?}", e)))?;
        let expired = Rc::new(Cell::new(false));

        let timer = {
            let controller = controller.clone();
            let expired = Rc::clone(&expired);
            Timeout::new(millis, move || {
                expired.set(true);
                controller.abort();
            })
        };

        Ok(Self {
            controller,
            expired,
            _timer: timer,
        })
    }

    fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    /// Map a transport failure, reporting aborts caused by the deadline as timeouts
    fn error(&self, err: gloo_net::Error) -> ApiError {
        if self.expired.get() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Map a non-2xx response to `ApiError::Status`
async fn ensure_success(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        response.status_text()
    } else {
        body
    };
    Err(ApiError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response, deadline: &Deadline) -> ApiResult<T> {
    let body = response.text().await.map_err(|e| deadline.error(e))?;
    Ok(serde_json::from_str(&body)?)
}

// ============ API Functions ============

/// Fetch sensor history, in the order the server returns it
pub async fn fetch_readings(zone: DisplayZone) -> ApiResult<Vec<Reading>> {
    let deadline = Deadline::start(REQUEST_TIMEOUT_MS)?;
    let response = Request::get(&url(READINGS_PATH))
        .abort_signal(Some(&deadline.signal()))
        .send()
        .await
        .map_err(|e| deadline.error(e))?;
    let records: Vec<ReadingRecord> = decode(ensure_success(response).await?, &deadline).await?;
    records_to_readings(records, zone)
}

/// Fetch the humidity forecast
pub async fn fetch_prediction() -> ApiResult<Prediction> {
    let deadline = Deadline::start(REQUEST_TIMEOUT_MS)?;
    let response = Request::get(&url(PREDICT_PATH))
        .abort_signal(Some(&deadline.signal()))
        .send()
        .await
        .map_err(|e| deadline.error(e))?;
    let body: PredictionResponse = decode(ensure_success(response).await?, &deadline).await?;
    Ok(body.into())
}

/// Switch one LED channel
pub async fn send_led_command(channel: &str, state: bool) -> ApiResult<()> {
    let deadline = Deadline::start(REQUEST_TIMEOUT_MS)?;
    let response = Request::post(&url(LED_PATH))
        .abort_signal(Some(&deadline.signal()))
        .json(&LedCommand::new(channel, state))
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| deadline.error(e))?;
    ensure_success(response).await?;
    Ok(())
}
