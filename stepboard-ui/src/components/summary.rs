//! Summary Component
//!
//! Today's date, the greeting and the selected participant's running totals.

use leptos::*;

use crate::state::use_global_state;

#[component]
pub fn Summary() -> impl IntoView {
    let state = use_global_state();
    let screen = create_memo(move |_| state.screen());

    view! {
        <section class="text-center space-y-2">
            <p id="current-date" class="text-sm text-gray-500">
                {move || screen.with(|s| s.date.clone())}
            </p>
            <h2 id="user-greeting" class="text-2xl font-bold text-red-700">
                {move || screen.with(|s| s.greeting.clone().unwrap_or_default())}
            </h2>

            <div class="grid grid-cols-2 gap-4 mt-4">
                <TotalCard
                    label="Pasos totales"
                    id="total-steps"
                    value=Signal::derive(move || screen.with(|s| s.total_steps))
                />
                <TotalCard
                    label="Calorías totales"
                    id="total-calories"
                    value=Signal::derive(move || screen.with(|s| s.total_calories))
                />
            </div>
        </section>
    }
}

#[component]
fn TotalCard(label: &'static str, id: &'static str, value: Signal<u64>) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <p class="text-sm text-gray-500">{label}</p>
            <p id=id class="text-3xl font-extrabold text-gray-800">
                {move || value.get().to_string()}
            </p>
        </div>
    }
}
