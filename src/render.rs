//! View model
//!
//! Turns session and leaderboard state into what the page shows, without touching
//! any page. Both front ends draw from [`Screen`].

use chrono::NaiveDate;

use crate::date::day_string;
use crate::leaderboard::Standings;
use crate::session::Session;

pub const SUBMIT_LABEL: &str = "Registrar Actividad Diaria";
pub const SUBMITTED_LABEL: &str = "Actividad Registrada Hoy";
pub const EMPTY_BOARD: &str = "No hay participantes aún. ¡Sé el primero!";

/// Everything the page renders
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub date: String,
    pub greeting: Option<String>,
    pub total_steps: u64,
    pub total_calories: u64,
    pub submit: SubmitButton,
    pub selected_duration: u32,
    pub leaderboard: Podium,
    pub rank_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: &'static str,
}

/// Top of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Podium {
    /// Nobody has logged anything yet
    Empty,
    Rows(Vec<PodiumRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodiumRow {
    pub position: usize,
    pub user_name: String,
    pub steps: u64,
    pub calories: u64,
    pub is_current: bool,
}

impl PodiumRow {
    pub fn steps_text(&self) -> String {
        format!("{} pasos", self.steps)
    }

    pub fn calories_text(&self) -> String {
        format!("{} calorías", self.calories)
    }
}

pub fn greeting(user_name: &str) -> Option<String> {
    if user_name.is_empty() {
        None
    } else {
        Some(format!("¡Hola, {}!", user_name))
    }
}

pub fn submit_button(session: &Session) -> SubmitButton {
    SubmitButton {
        enabled: session.can_submit(),
        label: if session.submitted_today() {
            SUBMITTED_LABEL
        } else {
            SUBMIT_LABEL
        },
    }
}

pub fn podium(standings: &Standings, current_user: &str) -> Podium {
    if standings.is_empty() {
        return Podium::Empty;
    }

    let rows = standings
        .podium()
        .iter()
        .enumerate()
        .map(|(idx, entry)| PodiumRow {
            position: idx + 1,
            user_name: entry.user_name.clone(),
            steps: entry.total_steps,
            calories: entry.total_calories,
            is_current: !current_user.is_empty() && entry.user_name == current_user,
        })
        .collect();
    Podium::Rows(rows)
}

pub fn rank_line(standings: &Standings, current_user: &str) -> Option<String> {
    standings
        .rank_of(current_user)
        .map(|rank| format!("¡Tu posición actual es: {}!", rank))
}

/// Render the whole page state
pub fn screen(session: &Session, standings: &Standings, today: NaiveDate) -> Screen {
    let (total_steps, total_calories) = session.totals();
    let user = session.user_name();

    Screen {
        date: day_string(today),
        greeting: greeting(user),
        total_steps,
        total_calories,
        submit: submit_button(session),
        selected_duration: session.duration(),
        leaderboard: podium(standings, user),
        rank_line: rank_line(standings, user),
    }
}
