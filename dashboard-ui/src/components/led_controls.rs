//! LED Controls
//!
//! On/off buttons for each LED channel on the sensor node.

use aiot_dashboard::CommandFeedback;
use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

/// Channels the node exposes
const LED_CHANNELS: [&str; 2] = ["led1", "led2"];

/// Row of LED switches
#[component]
pub fn LedControls() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-lg font-semibold mb-4">"LEDs"</h2>
            <div class="flex flex-wrap gap-6">
                {LED_CHANNELS
                    .into_iter()
                    .map(|channel| view! { <LedSwitch channel=channel /> })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}

#[component]
fn LedSwitch(channel: &'static str) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let send = move |on: bool| {
        let state = state.clone();
        spawn_local(async move {
            let result = api::send_led_command(channel, on).await;
            let feedback = CommandFeedback::from_result(channel, on, &result);
            if feedback.success {
                state.show_success(&feedback.message);
            } else {
                state.show_error(&feedback.message);
            }
        });
    };
    let send_off = send.clone();

    view! {
        <div class="flex items-center space-x-3">
            <span class="text-gray-300 uppercase">{channel}</span>
            <button
                on:click=move |_| send(true)
                class="px-4 py-2 rounded-lg text-sm font-medium bg-green-600 hover:bg-green-700 transition-colors"
            >
                "Encender"
            </button>
            <button
                on:click=move |_| send_off(false)
                class="px-4 py-2 rounded-lg text-sm font-medium bg-gray-700 hover:bg-gray-600 transition-colors"
            >
                "Apagar"
            </button>
        </div>
    }
}
