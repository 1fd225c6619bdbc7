//! Challenge Endpoint Gateway
//!
//! The spreadsheet-backed web endpoint owns participants, the activity ledger and
//! the leaderboard. It dispatches on an `action` query parameter:
//!
//! - `GET ?action=getParticipants` → `[{name}]`
//! - `GET ?action=getUserData&userName=<name>` → `{totalSteps, totalCalories, lastSubmissionDate}`
//! - `GET ?action=getLeaderboard` → `[{userName, totalSteps, totalCalories}]`
//! - `POST ?action=submitActivity` → `{success, message?}`
//!
//! Submissions are sent as a JSON string under a form-urlencoded content type; the
//! endpoint reads the raw body and does not accept a preflighted JSON request.

#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use http::HttpEndpoint;

use async_trait::async_trait;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ChallengeError, ChallengeResult};
use crate::leaderboard::LeaderboardEntry;

/// Deployed endpoint the client talks to unless configured otherwise
pub const DEFAULT_ENDPOINT_URL: &str = "https://script.google.com/macros/s/AKfycbzIuQ8QTG1YIrnYjM29FprrHg_vmDqBAOzYaiXQRyq8FNVUVT2Uyb9q4Mpu4PZzxRYp/exec";

/// Content type declared on submissions
pub const SUBMIT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ============ Wire Types ============

/// A challenge participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

/// Per-user totals and last submission day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_steps: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_calories: u64,
    /// YYYY-MM-DD of the most recent submission
    #[serde(default, deserialize_with = "lenient_day")]
    pub last_submission_date: Option<String>,
}

/// Body of a `submitActivity` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    pub user_name: String,
    pub steps: u64,
    pub calories: u64,
    pub activity: String,
    pub duration: u32,
    /// Screenshot as a data URL
    pub screenshot: String,
    pub today_date: String,
}

impl SubmitPayload {
    /// Serialize to the JSON string sent as the request body
    pub fn to_body(&self) -> ChallengeResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Response to a `submitActivity` request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitReceipt {
    /// Turn `success: false` into [`ChallengeError::Rejected`]
    pub fn into_result(self) -> ChallengeResult<SubmitReceipt> {
        if self.success {
            Ok(self)
        } else {
            Err(ChallengeError::Rejected(self.message))
        }
    }
}

/// Accepts integers, floats, numeric strings, null or nothing; anything unusable is 0.
///
/// Spreadsheet cells come back as whatever type the sheet holds, so totals are not
/// always JSON integers.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let count = match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.round() as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| *f > 0.0)
            .map(|f| f.round() as u64)
            .unwrap_or(0),
        _ => 0,
    };
    Ok(count)
}

/// Empty strings count as "never submitted"
fn lenient_day<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// ============ Request Building ============

/// Endpoint operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    GetParticipants,
    GetUserData { user_name: &'a str },
    GetLeaderboard,
    SubmitActivity,
}

impl Action<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Action::GetParticipants => "getParticipants",
            Action::GetUserData { .. } => "getUserData",
            Action::GetLeaderboard => "getLeaderboard",
            Action::SubmitActivity => "submitActivity",
        }
    }
}

/// Build the request URL for an action
pub fn action_url(base: &str, action: Action<'_>) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut url = format!("{}{}action={}", base, separator, action.name());
    if let Action::GetUserData { user_name } = action {
        url.push_str("&userName=");
        url.push_str(&urlencoding::encode(user_name));
    }
    url
}

/// Sort participants alphabetically for the selector.
///
/// Accents and case are ignored so "Álvaro" sorts with the A's; ties fall back to
/// the raw name.
pub fn sort_participants(participants: &mut [Participant]) {
    participants.sort_by_cached_key(|p| (collation_key(&p.name), p.name.clone()));
}

/// Name with diacritics stripped and lowercased
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============ Gateway Trait ============

/// Operations the client needs from the endpoint.
///
/// Futures are not required to be `Send` so the browser client can implement this
/// on top of `fetch`.
#[async_trait(?Send)]
pub trait ChallengeEndpoint {
    /// Participant roster in endpoint order
    async fn participants(&self) -> ChallengeResult<Vec<Participant>>;

    /// Totals and last submission day for one participant
    async fn user_record(&self, user_name: &str) -> ChallengeResult<UserRecord>;

    /// Leaderboard in endpoint order
    async fn leaderboard(&self) -> ChallengeResult<Vec<LeaderboardEntry>>;

    /// Record today's activity. `success: false` is returned as a receipt, not an error.
    async fn submit_activity(&self, payload: &SubmitPayload) -> ChallengeResult<SubmitReceipt>;
}
