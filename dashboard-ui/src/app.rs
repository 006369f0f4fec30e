//! App Root Component
//!
//! Providers, the periodic readings refresh and page layout.

use aiot_dashboard::chart::{ChartFrame, HUMIDITY_CHART, TEMPERATURE_CHART};
use leptos::*;

use crate::api;
use crate::components::{Chart, LedControls, PredictionPanel, Toast};
use crate::state::global::{provide_global_state, GlobalState};

/// Time between readings fetches
const REFRESH_INTERVAL_MS: u32 = 30_000;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // First load right away, then on every tick
    refresh_readings(state.clone());
    let state_for_timer = state.clone();
    let interval = gloo_timers::callback::Interval::new(REFRESH_INTERVAL_MS, move || {
        refresh_readings(state_for_timer.clone());
    });
    on_cleanup(move || drop(interval));

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <main class="flex-1 container mx-auto px-4 py-8 pb-24 space-y-8">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard AIoT"</h1>
                    <p class="text-gray-400 mt-1">"Temperatura y humedad en tiempo real"</p>
                </div>

                <Chart spec=TEMPERATURE_CHART />
                <Chart spec=HUMIDITY_CHART />

                <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                    <LedControls />
                    <PredictionPanel />
                </div>

                <BackendSettings />
            </main>

            // Footer with refresh status
            <Footer />

            // Toast notifications
            <Toast />
        </div>
    }
}

/// Fetch readings and render them; skipped while a fetch is in flight
fn refresh_readings(state: GlobalState) {
    if state.loading.get_untracked() {
        return;
    }
    state.loading.set(true);

    spawn_local(async move {
        match api::fetch_readings(state.zone).await {
            Ok(readings) => {
                state.apply_frame(ChartFrame::from_readings(&readings, state.order, state.zone));
            }
            Err(e) => state.apply_fetch_error(&e),
        }
        state.loading.set(false);
    });
}

/// Backend URL override, kept in local storage
#[component]
fn BackendSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let url = create_rw_signal(api::get_api_base());

    let on_save = move |_| {
        api::set_api_base(&url.get_untracked());
        url.set(api::get_api_base());
        refresh_readings(state.clone());
    };

    view! {
        <details class="bg-gray-800 rounded-xl p-6 text-sm">
            <summary class="cursor-pointer text-gray-400">"Servidor"</summary>
            <div class="flex items-center space-x-2 mt-4">
                <input
                    type="text"
                    class="flex-1 bg-gray-700 rounded-lg px-3 py-2"
                    prop:value=move || url.get()
                    on:input=move |ev| url.set(event_target_value(&ev))
                />
                <button
                    on:click=on_save
                    class="px-4 py-2 rounded-lg font-medium bg-primary-600 hover:bg-primary-700 transition-colors"
                >
                    "Guardar"
                </button>
            </div>
        </details>
    }
}

/// Footer component showing refresh status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (fetch_error, last_sync, loading) = (state.fetch_error, state.last_sync, state.loading);

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                {move || match fetch_error.get() {
                    Some(message) => view! {
                        <span class="flex items-center space-x-1 text-red-400">
                            <span class="w-2 h-2 bg-red-400 rounded-full" />
                            <span>{message}</span>
                        </span>
                    }.into_view(),
                    None => view! {
                        <span class="flex items-center space-x-1 text-green-400">
                            <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                            <span>{api::get_api_base()}</span>
                        </span>
                    }.into_view(),
                }}

                // Last sync time, in the viewer's clock
                <div class="text-gray-400">
                    {move || {
                        last_sync.get()
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| {
                                let local = dt.with_timezone(&chrono::Local);
                                format!("Actualizado: {}", local.format("%H:%M:%S"))
                            })
                            .unwrap_or_else(|| "Sin actualizar".to_string())
                    }}
                </div>

                {move || {
                    if loading.get() {
                        view! {
                            <div class="flex items-center space-x-2 text-primary-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Cargando..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}
