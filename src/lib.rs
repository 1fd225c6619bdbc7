//! # Stepboard
//!
//! Client core for a daily step challenge: participants pick their name, log one
//! activity per day with a screenshot as proof, and follow a shared leaderboard.
//! All persistence lives behind a spreadsheet-backed HTTP endpoint; this crate is the
//! form state machine, the rate table and the gateway to that endpoint.
//!
//! ## Modules
//!
//! - [`activity`]: Fixed activity rate table and derived steps/calories
//! - [`session`]: Form state machine for the selected participant
//! - [`leaderboard`]: Ranking and stale-response guard for leaderboard refreshes
//! - [`notice`]: Single-slot transient notification banner
//! - [`screenshot`]: Screenshot proof encoded as a base64 data URL
//! - [`endpoint`]: Wire types and the [`ChallengeEndpoint`] gateway trait
//! - [`client`]: Page state split into prepare/apply steps around each endpoint call
//! - [`controller`]: Orchestrates load, selection, submission and refresh
//! - [`render`]: Pure state to view-model rendering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stepboard::{Controller, HttpEndpoint, Screenshot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = HttpEndpoint::new(stepboard::DEFAULT_ENDPOINT_URL, 30)?;
//!     let mut app = Controller::new(endpoint);
//!
//!     app.load().await;
//!     app.select_user("Ana").await;
//!     app.choose_activity("Correr");
//!     app.choose_duration(30);
//!     app.set_manual_steps("500");
//!     app.attach_screenshot(Some(Screenshot::from_bytes("image/png", b"...")));
//!
//!     app.submit().await?;
//!     println!("{:?}", app.screen());
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod client;
pub mod controller;
pub mod date;
pub mod endpoint;
pub mod error;
pub mod leaderboard;
pub mod notice;
pub mod render;
pub mod screenshot;
pub mod session;

#[cfg(feature = "native")]
pub mod config;

pub use activity::{derive, parse_manual_steps, Activity, Derived, Rates, DURATION_CHOICES};

pub use client::ClientState;

pub use controller::Controller;

pub use endpoint::{
    action_url, sort_participants, Action, ChallengeEndpoint, Participant, SubmitPayload,
    SubmitReceipt, UserRecord, DEFAULT_ENDPOINT_URL,
};

#[cfg(feature = "native")]
pub use endpoint::HttpEndpoint;

pub use error::{ChallengeError, ChallengeResult, ErrorKind};

pub use leaderboard::{LeaderboardEntry, RefreshTicket, Standings, REFRESH_INTERVAL_SECS};

pub use notice::{Banner, NoticeTicket, NOTICE_TTL_MS};

pub use render::{Podium, PodiumRow, Screen, SubmitButton};

pub use screenshot::Screenshot;

pub use session::{Phase, PickTicket, Session, Submission};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
