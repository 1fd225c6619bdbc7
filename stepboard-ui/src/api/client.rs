//! HTTP API Client
//!
//! `fetch`-backed gateway to the challenge endpoint.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde_json::from_str;

use stepboard::endpoint::SUBMIT_CONTENT_TYPE;
use stepboard::{
    action_url, Action, ChallengeEndpoint, ChallengeError, ChallengeResult, LeaderboardEntry,
    Participant, SubmitPayload, SubmitReceipt, UserRecord, DEFAULT_ENDPOINT_URL,
};

/// Browser gateway to the challenge endpoint
#[derive(Debug, Clone)]
pub struct FetchEndpoint {
    base_url: String,
}

impl Default for FetchEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_URL)
    }
}

impl FetchEndpoint {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, action: Action<'_>) -> ChallengeResult<T> {
        let response = Request::get(&action_url(&self.base_url, action))
            .send()
            .await
            .map_err(|e| ChallengeError::Transport(e.to_string()))?;

        read_json(response).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> ChallengeResult<T> {
    if !response.ok() {
        return Err(ChallengeError::Status(response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| ChallengeError::Transport(e.to_string()))?;

    Ok(from_str(&text)?)
}

#[async_trait(?Send)]
impl ChallengeEndpoint for FetchEndpoint {
    async fn participants(&self) -> ChallengeResult<Vec<Participant>> {
        self.get_json(Action::GetParticipants).await
    }

    async fn user_record(&self, user_name: &str) -> ChallengeResult<UserRecord> {
        self.get_json(Action::GetUserData { user_name }).await
    }

    async fn leaderboard(&self) -> ChallengeResult<Vec<LeaderboardEntry>> {
        self.get_json(Action::GetLeaderboard).await
    }

    async fn submit_activity(&self, payload: &SubmitPayload) -> ChallengeResult<SubmitReceipt> {
        // A form content type keeps this a "simple" request, so the browser skips the
        // CORS preflight the endpoint cannot answer
        let response = Request::post(&action_url(&self.base_url, Action::SubmitActivity))
            .header("Content-Type", SUBMIT_CONTENT_TYPE)
            .body(payload.to_body()?)
            .map_err(|e| ChallengeError::Transport(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ChallengeError::Transport(e.to_string()))?;

        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_base_url_trailing_slash_trimmed() {
        let endpoint = FetchEndpoint::new("http://localhost:9000/exec/");
        assert_eq!(endpoint.base_url(), "http://localhost:9000/exec");
    }

    #[wasm_bindgen_test]
    fn test_default_points_at_deployed_endpoint() {
        assert_eq!(FetchEndpoint::default().base_url(), DEFAULT_ENDPOINT_URL);
    }
}
