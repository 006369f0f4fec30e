//! Toast Notification Component
//!
//! Shows LED command outcomes and prediction errors. Each toast clears
//! itself after a timeout or when clicked.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (success, error) = (state.success, state.error);

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2">
            {move || {
                success.get().map(|msg| view! {
                    <ToastMessage message=msg signal=success ok=true />
                })
            }}
            {move || {
                error.get().map(|msg| view! {
                    <ToastMessage message=msg signal=error ok=false />
                })
            }}
        </div>
    }
}

#[component]
fn ToastMessage(
    #[prop(into)] message: String,
    /// Signal holding this toast; cleared on dismiss
    signal: RwSignal<Option<String>>,
    ok: bool,
) -> impl IntoView {
    let (icon, bg_class) = if ok {
        ("✓", "bg-green-600")
    } else {
        ("✕", "bg-red-600")
    };

    view! {
        <div
            role="status"
            on:click=move |_| signal.set(None)
            class=format!(
                "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg cursor-pointer",
                bg_class
            )
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
