//! App Root Component
//!
//! Page layout, the initial load sequence and leaderboard polling.

use leptos::*;

use stepboard::REFRESH_INTERVAL_SECS;

use crate::api;
use crate::components::{ActivityForm, Leaderboard, Summary, Toast};
use crate::state::provide_global_state;

/// Leaderboard polling interval
const POLL_INTERVAL_MS: u32 = (REFRESH_INTERVAL_SECS * 1000) as u32;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    // Participants, then the leaderboard, then start polling
    spawn_local(async move {
        state.load(api::endpoint()).await;

        gloo_timers::callback::Interval::new(POLL_INTERVAL_MS, move || {
            spawn_local(state.refresh_leaderboard(api::endpoint()));
        })
        .forget();
    });

    view! {
        <div class="min-h-screen flex flex-col items-center px-4 py-8">
            <header class="text-center mb-8">
                <h1 class="text-4xl font-extrabold text-red-700">"Reto de Pasos"</h1>
                <p class="text-gray-600 mt-1">"Registra tu actividad diaria y sube en la clasificación"</p>
            </header>

            <main class="w-full max-w-xl space-y-6">
                <Summary />
                <ActivityForm />
                <Leaderboard />
            </main>

            <Toast />
        </div>
    }
}
