//! HTTP gateway for native builds

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{
    action_url, Action, ChallengeEndpoint, Participant, SubmitPayload, SubmitReceipt, UserRecord,
    SUBMIT_CONTENT_TYPE,
};
use crate::error::{ChallengeError, ChallengeResult};
use crate::leaderboard::LeaderboardEntry;

/// reqwest-backed [`ChallengeEndpoint`]
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Client,
    base_url: String,
}

impl HttpEndpoint {
    /// Create a gateway for the endpoint at `base_url`
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> ChallengeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ChallengeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, action: Action<'_>) -> ChallengeResult<T> {
        let url = action_url(&self.base_url, action);
        tracing::debug!(action = action.name(), "GET {}", url);

        let response = self.client.get(&url).send().await.map_err(transport)?;
        read_json(response).await
    }
}

fn transport(err: reqwest::Error) -> ChallengeError {
    if err.is_timeout() {
        ChallengeError::Transport(format!("request timed out: {}", err))
    } else {
        ChallengeError::Transport(err.to_string())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ChallengeResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(ChallengeError::Status(status.as_u16()));
    }

    let text = response.text().await.map_err(transport)?;
    Ok(serde_json::from_str(&text)?)
}

#[async_trait(?Send)]
impl ChallengeEndpoint for HttpEndpoint {
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
        let url = action_url(&self.base_url, Action::SubmitActivity);
        tracing::debug!(user = %payload.user_name, "POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, SUBMIT_CONTENT_TYPE)
            .body(payload.to_body()?)
            .send()
            .await
            .map_err(transport)?;

        read_json(response).await
    }
}
