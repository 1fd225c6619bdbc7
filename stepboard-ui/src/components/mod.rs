//! UI Components
//!
//! Leptos components for the activity logger page.

pub mod activity_form;
pub mod leaderboard;
pub mod summary;
pub mod toast;

pub use activity_form::ActivityForm;
pub use leaderboard::Leaderboard;
pub use summary::Summary;
pub use toast::Toast;
