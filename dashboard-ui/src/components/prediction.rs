//! Prediction Panel
//!
//! Requests the humidity forecast on demand and shows it as text.

use aiot_dashboard::failure_text;
use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

#[component]
pub fn PredictionPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let pending = create_rw_signal(false);

    let state_for_click = state.clone();
    let on_click = move |_| {
        let state = state_for_click.clone();
        pending.set(true);
        spawn_local(async move {
            match api::fetch_prediction().await {
                Ok(prediction) => state.prediction.set(Some(prediction)),
                // previous forecast stays on screen
                Err(e) => state.show_error(&failure_text(&e)),
            }
            pending.set(false);
        });
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-lg font-semibold mb-4">"Predicción"</h2>
            <button
                on:click=on_click
                disabled=move || pending.get()
                class="px-4 py-2 rounded-lg text-sm font-medium bg-primary-600 hover:bg-primary-700 transition-colors"
            >
                "Predecir humedad"
            </button>
            <p id="predictionResult" class="mt-4 text-gray-300">
                {move || state.prediction.get().map(|p| p.display_text()).unwrap_or_default()}
            </p>
        </div>
    }
}
