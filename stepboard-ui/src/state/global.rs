//! Global Application State
//!
//! One signal holding the core [`ClientState`]. The async flows await the endpoint
//! between two `ClientState` steps, so no borrow is held across an `.await`, and
//! the rules they apply are the ones the native controller runs.

use leptos::*;

use stepboard::date;
use stepboard::{
    ChallengeEndpoint, ChallengeResult, ClientState, NoticeTicket, PickTicket, Screen, Screenshot,
    NOTICE_TTL_MS,
};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Session, standings, roster and banner
    pub client: RwSignal<ClientState>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        client: create_rw_signal(ClientState::new()),
    };

    provide_context(state);
    state
}

pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

/// Mirror endpoint failures to the browser console
fn logged<T>(context: &str, result: ChallengeResult<T>) -> ChallengeResult<T> {
    if let Err(e) = &result {
        web_sys::console::error_1(&format!("{}: {}", context, e).into());
    }
    result
}

impl GlobalState {
    /// Everything the page renders, tracked reactively
    pub fn screen(&self) -> Screen {
        let today = date::today();
        self.client.with(|c| c.screen(today))
    }

    /// Run one state step; a message it raises hides itself after the banner TTL
    /// unless replaced
    fn step<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> Option<R> {
        let before = self.client.with_untracked(ClientState::notice_ticket);
        let out = self.client.try_update(f);
        let after = self.client.with_untracked(ClientState::notice_ticket);

        if let Some(ticket) = after.filter(|t| Some(*t) != before) {
            self.schedule_expiry(ticket);
        }
        out
    }

    fn schedule_expiry(&self, ticket: NoticeTicket) {
        let client = self.client;
        gloo_timers::callback::Timeout::new(NOTICE_TTL_MS as u32, move || {
            client.update(|c| {
                c.expire_notice(ticket);
            });
        })
        .forget();
    }

    /// Initial page load: participants first, then the leaderboard
    pub async fn load<E: ChallengeEndpoint>(self, endpoint: E) {
        self.load_participants(&endpoint).await;
        self.refresh_leaderboard(endpoint).await;
    }

    async fn load_participants<E: ChallengeEndpoint>(self, endpoint: &E) {
        let result = logged("Error fetching participants", endpoint.participants().await);
        self.step(|c| c.participants_loaded(result));
    }

    /// Fetch the leaderboard; a response older than one already applied is dropped
    pub async fn refresh_leaderboard<E: ChallengeEndpoint>(self, endpoint: E) {
        let Some(ticket) = self.step(ClientState::begin_refresh) else {
            return;
        };

        let result = logged("Error fetching leaderboard", endpoint.leaderboard().await);
        self.step(|c| c.leaderboard_loaded(ticket, result));
    }

    /// Select a participant and load their totals
    pub async fn select_user<E: ChallengeEndpoint>(self, endpoint: E, user_name: String) {
        if self.step(|c| c.select_user(&user_name)) != Some(true) {
            return;
        }

        let result = logged("Error loading user data", endpoint.user_record(&user_name).await);
        let today = date::today();
        self.step(|c| c.user_record_loaded(&user_name, result, today));
    }

    pub fn choose_activity(&self, activity: String) {
        self.client.update(|c| c.choose_activity(&activity));
    }

    pub fn choose_duration(&self, minutes: u32) {
        self.client.update(|c| c.choose_duration(minutes));
    }

    pub fn set_manual_steps(&self, raw: String) {
        self.client.update(|c| c.set_manual_steps(&raw));
    }

    pub fn attach_screenshot(&self, screenshot: Option<Screenshot>) {
        self.client.update(|c| c.attach_screenshot(screenshot));
    }

    /// Start reading a picked file; only the latest pick may attach its result
    pub fn begin_pick(&self) -> Option<PickTicket> {
        self.client.try_update(ClientState::begin_pick)
    }

    pub fn finish_pick(&self, ticket: PickTicket, screenshot: Option<Screenshot>) {
        self.client.update(|c| {
            c.finish_pick(ticket, screenshot);
        });
    }

    /// Submit today's activity and refresh the leaderboard on success
    pub async fn submit<E: ChallengeEndpoint>(self, endpoint: E) {
        let today = date::today();
        let Some(Ok(submission)) = self.step(|c| c.begin_submit(today)) else {
            return;
        };

        let result = logged(
            "Error saving daily submission",
            endpoint.submit_activity(&submission.payload).await,
        );
        if let Some(Ok(())) = self.step(|c| c.submit_finished(&submission, result)) {
            self.refresh_leaderboard(endpoint).await;
        }
    }
}
