//! Stepboard Activity Logger
//!
//! Single-page client for the daily step challenge, built with Leptos (WASM).
//!
//! # Features
//!
//! - Pick a participant and see their running totals
//! - Log one activity per day with duration, device steps and a screenshot
//! - Podium of the top three participants, refreshed every 30 seconds
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly. Business
//! rules come from the `stepboard` core crate; this crate only binds them to the page
//! and talks to the endpoint through `fetch`.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
