//! Activity Form Component
//!
//! Participant selector and the daily activity form: activity, duration, manual
//! steps and the screenshot proof.

use leptos::*;
use wasm_bindgen::{closure::Closure, JsCast};

use stepboard::{Activity, Screenshot, DURATION_CHOICES};

use crate::api;
use crate::state::{use_global_state, GlobalState};

/// Daily activity form
#[component]
pub fn ActivityForm() -> impl IntoView {
    let state = use_global_state();
    let screen = create_memo(move |_| state.screen());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(state.submit(api::endpoint()));
    };

    view! {
        <form on:submit=on_submit class="bg-white rounded-xl shadow p-6 space-y-5">
            <UserSelect />
            <ActivitySelect />
            <DurationButtons />
            <ManualSteps />
            <ScreenshotInput />

            <button
                id="submit-button"
                type="submit"
                disabled=move || !screen.with(|s| s.submit.enabled)
                class="w-full bg-red-600 hover:bg-red-700 disabled:bg-gray-400
                       disabled:cursor-not-allowed text-white rounded-lg py-3 font-semibold
                       transition-colors"
            >
                {move || screen.with(|s| s.submit.label)}
            </button>
        </form>
    }
}

#[component]
fn UserSelect() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-2">"Participante"</label>
            <select
                id="user-select"
                disabled=move || !state.client.with(|c| c.roster_ready())
                prop:value=move || state.client.with(|c| c.session().user_name().to_string())
                on:change=move |ev| {
                    spawn_local(state.select_user(api::endpoint(), event_target_value(&ev)))
                }
                class=FIELD_CLASS
            >
                <option value="">"-- Selecciona un participante --"</option>
                {move || {
                    state.client.with(|c| c.roster().to_vec())
                        .into_iter()
                        .map(|p| view! { <option value=p.name.clone()>{p.name}</option> })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

#[component]
fn ActivitySelect() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-2">"Actividad"</label>
            <select
                id="activity-select"
                prop:value=move || state.client.with(|c| c.session().activity().to_string())
                on:change=move |ev| state.choose_activity(event_target_value(&ev))
                class=FIELD_CLASS
            >
                <option value="">"-- Selecciona una actividad --"</option>
                {Activity::catalogue()
                    .into_iter()
                    .map(|a| view! { <option value=a.label()>{a.label()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn DurationButtons() -> impl IntoView {
    let state = use_global_state();
    let selected = create_memo(move |_| state.client.with(|c| c.session().duration()));

    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-2">"Duración (minutos)"</label>
            <div class="flex flex-wrap gap-2">
                {DURATION_CHOICES.into_iter().map(|minutes| view! {
                    <button
                        type="button"
                        data-duration=minutes
                        on:click=move |_| state.choose_duration(minutes)
                        class=move || duration_class(selected.get() == minutes)
                    >
                        {minutes}
                    </button>
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn ManualSteps() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-2">"Pasos registrados en tu dispositivo"</label>
            <input
                id="manual-steps"
                type="number"
                min="0"
                placeholder="0"
                prop:value=move || state.client.with(|c| c.session().manual_steps().to_string())
                on:input=move |ev| state.set_manual_steps(event_target_value(&ev))
                class=FIELD_CLASS
            />
        </div>
    }
}

#[component]
fn ScreenshotInput() -> impl IntoView {
    let state = use_global_state();
    let file_input = create_node_ref::<html::Input>();
    let preview = create_memo(move |_| {
        state
            .client
            .with(|c| c.session().screenshot().map(|shot| shot.data_url().to_string()))
    });

    // The form resets the stored screenshot after a submission; clear the picker too
    create_effect(move |_| {
        if preview.get().is_none() {
            if let Some(input) = file_input.get() {
                input.set_value("");
            }
        }
    });

    let on_change = move |ev: web_sys::Event| read_screenshot(state, &ev);

    view! {
        <div>
            <label class="block text-sm text-gray-600 mb-2">"Captura de pantalla"</label>
            <input
                id="screenshot-input"
                type="file"
                accept="image/*"
                node_ref=file_input
                on:change=on_change
                class="w-full text-sm text-gray-600"
            />
            {move || preview.get().map(|src| view! {
                <img
                    id="screenshot-preview"
                    src=src
                    alt="Vista previa"
                    class="mt-3 max-h-48 rounded-lg shadow"
                />
            })}
        </div>
    }
}

/// Read the picked file as a data URL; no file clears the screenshot.
///
/// A read that finishes after a newer pick, a cancel or a submission is dropped.
fn read_screenshot(state: GlobalState, ev: &web_sys::Event) {
    let file = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0));

    let Some(file) = file else {
        state.attach_screenshot(None);
        return;
    };

    let Some(ticket) = state.begin_pick() else {
        return;
    };

    let reader = match web_sys::FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            web_sys::console::error_2(&"Failed to create FileReader".into(), &e);
            return;
        }
    };

    let onloadend = {
        let reader = reader.clone();
        Closure::wrap(Box::new(move |_: web_sys::Event| {
            let screenshot = reader
                .result()
                .ok()
                .and_then(|value| value.as_string())
                .and_then(|url| Screenshot::from_data_url(url).ok());
            state.finish_pick(ticket, screenshot);
        }) as Box<dyn FnMut(_)>)
    };

    reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
    onloadend.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        web_sys::console::error_2(&"Failed to read screenshot".into(), &e);
    }
}

const FIELD_CLASS: &str = "w-full bg-gray-50 rounded-lg px-4 py-3 text-gray-800 \
                           border border-gray-300 focus:border-red-500 focus:outline-none";

fn duration_class(selected: bool) -> &'static str {
    if selected {
        "btn-duration selected px-4 py-2 rounded-lg text-sm font-medium bg-red-600 text-white"
    } else {
        "btn-duration px-4 py-2 rounded-lg text-sm font-medium bg-gray-200 text-gray-700 \
         hover:bg-gray-300"
    }
}
