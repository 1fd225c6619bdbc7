//! Leaderboard Component
//!
//! Top three participants by steps plus the selected participant's rank.

use leptos::*;

use stepboard::render::EMPTY_BOARD;
use stepboard::{Podium, PodiumRow};

use crate::state::use_global_state;

#[component]
pub fn Leaderboard() -> impl IntoView {
    let state = use_global_state();
    let screen = create_memo(move |_| state.screen());
    let podium = create_memo(move |_| screen.with(|s| s.leaderboard.clone()));

    view! {
        <section class="bg-white rounded-xl shadow p-6">
            <h2 class="text-xl font-bold text-gray-800 mb-4">"Tabla de Clasificación"</h2>

            <ul id="leaderboard-list" class="space-y-3">
                {move || match podium.get() {
                    Podium::Empty => view! {
                        <li class="text-gray-600 text-center">{EMPTY_BOARD}</li>
                    }
                    .into_view(),
                    Podium::Rows(rows) => rows
                        .into_iter()
                        .map(|row| view! { <LeaderboardRow row=row /> })
                        .collect_view(),
                }}
            </ul>

            <p id="current-user-position" class="mt-4 text-center font-semibold text-red-700">
                {move || screen.with(|s| s.rank_line.clone().unwrap_or_default())}
            </p>
        </section>
    }
}

#[component]
fn LeaderboardRow(row: PodiumRow) -> impl IntoView {
    view! {
        <li class=row_class(row.is_current)>
            <div class="flex items-center">
                <span class="text-xl font-bold text-gray-700 mr-3">{format!("{}.", row.position)}</span>
                <span class="font-medium text-gray-800 truncate">{row.user_name.clone()}</span>
            </div>
            <div class="text-right">
                <p class="text-lg font-semibold text-red-700">{row.steps_text()}</p>
                <p class="text-sm text-gray-500">{row.calories_text()}</p>
            </div>
        </li>
    }
}

fn row_class(is_current: bool) -> &'static str {
    if is_current {
        "leaderboard-item current-user flex justify-between items-center p-3 rounded-lg \
         bg-red-100 ring-2 ring-red-400"
    } else {
        "leaderboard-item flex justify-between items-center p-3 rounded-lg bg-gray-50"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_class_marks_current_user() {
        assert!(row_class(true).contains("current-user"));
        assert!(!row_class(false).contains("current-user"));
    }
}
