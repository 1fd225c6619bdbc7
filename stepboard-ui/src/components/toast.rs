//! Toast Notification Component
//!
//! Shows the single banner message; a newer message replaces it immediately.

use leptos::*;

use crate::state::use_global_state;

/// Banner container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();
    let message = create_memo(move |_| state.client.with(|c| c.banner().message().map(str::to_string)));

    view! {
        <div class="fixed top-4 left-1/2 -translate-x-1/2 z-50">
            {move || {
                message.get().map(|msg| view! { <ToastMessage message=msg /> })
            }}
        </div>
    }
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div
            id="message-box"
            class="bg-red-600 text-white px-6 py-3 rounded-lg shadow-lg text-center \
                   font-medium animate-fade-in-down"
        >
            {message}
        </div>
    }
}
