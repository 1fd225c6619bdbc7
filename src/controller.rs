//! Client controller
//!
//! Drives a [`ClientState`] against a [`ChallengeEndpoint`]: page load, participant
//! selection, submission and leaderboard refresh. Every failure is caught, logged
//! and turned into a banner message; nothing is retried.

use chrono::NaiveDate;

use crate::client::ClientState;
use crate::date;
use crate::endpoint::{ChallengeEndpoint, Participant};
use crate::error::ChallengeResult;
use crate::leaderboard::Standings;
use crate::notice::Banner;
use crate::render::Screen;
use crate::screenshot::Screenshot;
use crate::session::{Phase, Session, Submission};

/// Owns the client state and the endpoint gateway
pub struct Controller<E> {
    endpoint: E,
    state: ClientState,
    clock: fn() -> NaiveDate,
}

impl<E: ChallengeEndpoint> Controller<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            state: ClientState::new(),
            clock: date::today,
        }
    }

    /// Replace the source of "today"
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        self.state.session()
    }

    pub fn standings(&self) -> &Standings {
        self.state.standings()
    }

    pub fn roster(&self) -> &[Participant] {
        self.state.roster()
    }

    pub fn roster_ready(&self) -> bool {
        self.state.roster_ready()
    }

    pub fn banner(&self) -> &Banner {
        self.state.banner()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.state.take_notice()
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn screen(&self) -> Screen {
        self.state.screen(self.today())
    }

    /// Initial page load: participants first, then the leaderboard
    pub async fn load(&mut self) {
        self.load_participants().await;
        self.refresh_leaderboard().await;
    }

    pub async fn load_participants(&mut self) -> bool {
        let result = self.endpoint.participants().await;
        self.state.participants_loaded(result)
    }

    /// Select a participant and load their totals
    pub async fn select_user(&mut self, user_name: &str) -> bool {
        if !self.state.select_user(user_name) {
            return true;
        }
        let result = self.endpoint.user_record(user_name).await;
        let today = self.today();
        self.state.user_record_loaded(user_name, result, today)
    }

    pub fn choose_activity(&mut self, activity: &str) {
        self.state.choose_activity(activity);
    }

    pub fn choose_duration(&mut self, minutes: u32) {
        self.state.choose_duration(minutes);
    }

    pub fn set_manual_steps(&mut self, raw: &str) {
        self.state.set_manual_steps(raw);
    }

    pub fn attach_screenshot(&mut self, screenshot: Option<Screenshot>) {
        self.state.attach_screenshot(screenshot);
    }

    /// Submit today's activity.
    ///
    /// Local validation failures never reach the endpoint. On success the totals
    /// grow, the form resets and the leaderboard is refreshed.
    pub async fn submit(&mut self) -> ChallengeResult<Submission> {
        let submission = self.state.begin_submit(self.today())?;
        let result = self.endpoint.submit_activity(&submission.payload).await;
        self.state.submit_finished(&submission, result)?;
        self.refresh_leaderboard().await;
        Ok(submission)
    }

    /// Fetch the leaderboard and sync the selected participant's totals and rank
    pub async fn refresh_leaderboard(&mut self) -> bool {
        let ticket = self.state.begin_refresh();
        let result = self.endpoint.leaderboard().await;
        self.state.leaderboard_loaded(ticket, result)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Current rank of the selected participant
    pub fn rank(&self) -> Option<usize> {
        self.state.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{SubmitPayload, SubmitReceipt, UserRecord};
    use crate::error::{ChallengeError, ErrorKind};
    use crate::leaderboard::LeaderboardEntry;
    use crate::notice::messages;
    use crate::render::{self, Podium};
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    /// In-memory endpoint that behaves like the spreadsheet ledger
    #[derive(Default)]
    struct FakeEndpoint {
        participants: Vec<String>,
        records: RefCell<HashMap<String, UserRecord>>,
        fail_reads: bool,
        fail_submit: bool,
        reject_with: Option<String>,
        submissions: RefCell<Vec<SubmitPayload>>,
        leaderboard_calls: RefCell<u32>,
    }

    impl FakeEndpoint {
        fn with_users(users: &[(&str, u64, Option<&str>)]) -> Self {
            let records = users
                .iter()
                .map(|(name, steps, day)| {
                    (
                        name.to_string(),
                        UserRecord {
                            total_steps: *steps,
                            total_calories: steps * 4 / 100,
                            last_submission_date: day.map(str::to_string),
                        },
                    )
                })
                .collect();
            Self {
                participants: users.iter().map(|(n, _, _)| n.to_string()).collect(),
                records: RefCell::new(records),
                ..Default::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl ChallengeEndpoint for FakeEndpoint {
        async fn participants(&self) -> ChallengeResult<Vec<Participant>> {
            if self.fail_reads {
                return Err(ChallengeError::Status(500));
            }
            Ok(self
                .participants
                .iter()
                .map(|name| Participant { name: name.clone() })
                .collect())
        }

        async fn user_record(&self, user_name: &str) -> ChallengeResult<UserRecord> {
            if self.fail_reads {
                return Err(ChallengeError::Transport("connection refused".into()));
            }
            Ok(self.records.borrow().get(user_name).cloned().unwrap_or_default())
        }

        async fn leaderboard(&self) -> ChallengeResult<Vec<LeaderboardEntry>> {
            *self.leaderboard_calls.borrow_mut() += 1;
            if self.fail_reads {
                return Err(ChallengeError::Status(503));
            }
            Ok(self
                .records
                .borrow()
                .iter()
                .filter(|(_, r)| r.total_steps > 0)
                .map(|(name, r)| LeaderboardEntry {
                    user_name: name.clone(),
                    total_steps: r.total_steps,
                    total_calories: r.total_calories,
                })
                .collect())
        }

        async fn submit_activity(&self, payload: &SubmitPayload) -> ChallengeResult<SubmitReceipt> {
            if self.fail_submit {
                return Err(ChallengeError::Transport("timed out".into()));
            }
            if let Some(reason) = &self.reject_with {
                return Ok(SubmitReceipt {
                    success: false,
                    message: Some(reason.clone()),
                });
            }
            self.submissions.borrow_mut().push(payload.clone());
            let mut records = self.records.borrow_mut();
            let record = records.entry(payload.user_name.clone()).or_default();
            record.total_steps += payload.steps;
            record.total_calories += payload.calories;
            record.last_submission_date = Some(payload.today_date.clone());
            Ok(SubmitReceipt {
                success: true,
                message: None,
            })
        }
    }

    fn controller(endpoint: FakeEndpoint) -> Controller<FakeEndpoint> {
        Controller::new(endpoint).with_clock(fixed_today)
    }

    fn fill_form(app: &mut Controller<FakeEndpoint>) {
        app.choose_activity("Correr");
        app.choose_duration(30);
        app.set_manual_steps("500");
        app.attach_screenshot(Some(Screenshot::from_bytes("image/jpeg", b"proof")));
    }

    #[tokio::test]
    async fn test_load_sorts_roster_and_board() {
        let mut app = controller(FakeEndpoint::with_users(&[
            ("Luis", 900, None),
            ("ana", 300, None),
            ("Beto", 600, None),
        ]));
        app.load().await;

        assert!(app.roster_ready());
        let names: Vec<_> = app.roster().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ana", "Beto", "Luis"]);

        let steps: Vec<_> = app.standings().entries().iter().map(|e| e.total_steps).collect();
        assert_eq!(steps, vec![900, 600, 300]);
        assert_eq!(app.banner().message(), None);
    }

    #[tokio::test]
    async fn test_load_orders_accented_names_alphabetically() {
        let mut app = controller(FakeEndpoint::with_users(&[
            ("Zoe", 0, None),
            ("Álvaro", 0, None),
            ("Beto", 0, None),
            ("Óscar", 0, None),
            ("Pablo", 0, None),
        ]));
        app.load_participants().await;

        let names: Vec<_> = app.roster().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Álvaro", "Beto", "Óscar", "Pablo", "Zoe"]);
    }

    #[tokio::test]
    async fn test_load_failures_notify_and_keep_state() {
        let mut app = controller(FakeEndpoint {
            fail_reads: true,
            ..Default::default()
        });
        app.load().await;

        assert!(!app.roster_ready());
        assert!(app.standings().is_empty());
        // Leaderboard failure came last and replaced the roster message
        assert_eq!(app.banner().message(), Some(messages::LEADERBOARD_FAILED));
    }

    #[tokio::test]
    async fn test_full_submission_flow() {
        let mut app = controller(FakeEndpoint::with_users(&[
            ("Ana", 1000, Some("2024-05-01")),
            ("Luis", 9000, None),
        ]));
        app.load().await;
        app.select_user("Ana").await;
        assert_eq!(app.session().totals(), (1000, 40));
        assert_eq!(app.phase(), Phase::UserSelected);

        fill_form(&mut app);
        assert!(app.screen().submit.enabled);

        let submission = app.submit().await.unwrap();
        assert_eq!(submission.derived.steps, 5000);
        assert_eq!(submission.derived.calories, 200);

        assert_eq!(app.session().totals(), (6000, 240));
        assert_eq!(app.phase(), Phase::SubmittedToday);
        assert_eq!(app.session().user_name(), "Ana");
        assert_eq!(app.session().activity(), "");
        assert_eq!(app.session().duration(), 0);
        assert_eq!(app.session().manual_steps(), "");
        assert!(app.session().screenshot().is_none());
        assert_eq!(app.banner().message(), Some(messages::SUBMIT_OK));

        // Post-submit refresh picked up the new ledger totals
        assert_eq!(*app.endpoint().leaderboard_calls.borrow(), 2);
        assert_eq!(app.rank(), Some(2));

        let sent = app.endpoint().submissions.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].today_date, "2024-05-02");
        assert_eq!(sent[0].activity, "Correr");
    }

    #[tokio::test]
    async fn test_already_submitted_today_blocks_without_request() {
        let mut app = controller(FakeEndpoint::with_users(&[("Ana", 3000, Some("2024-05-02"))]));
        app.select_user("Ana").await;

        assert_eq!(app.phase(), Phase::SubmittedToday);
        fill_form(&mut app);
        let screen = app.screen();
        assert!(!screen.submit.enabled);
        assert_eq!(screen.submit.label, render::SUBMITTED_LABEL);

        let err = app.submit().await.unwrap_err();
        assert!(matches!(err, ChallengeError::AlreadySubmitted(_)));
        assert_eq!(app.banner().message(), Some(messages::ALREADY_SUBMITTED));
        assert!(app.endpoint().submissions.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_form_never_reaches_endpoint() {
        let mut app = controller(FakeEndpoint::with_users(&[("Ana", 0, None)]));
        app.select_user("Ana").await;
        app.choose_activity("Nadar");
        app.choose_duration(45);

        let err = app.submit().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(app.banner().message(), Some(messages::INCOMPLETE));
        assert!(app.endpoint().submissions.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_submission_leaves_state() {
        let mut app = controller(FakeEndpoint {
            reject_with: Some("Duplicado".to_string()),
            ..FakeEndpoint::with_users(&[("Ana", 1000, None)])
        });
        app.select_user("Ana").await;
        fill_form(&mut app);
        let before = app.session().clone();

        let err = app.submit().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(app.session(), &before);
        assert_eq!(app.phase(), Phase::FormComplete);
        assert_eq!(app.banner().message(), Some("Error al registrar: Duplicado"));
    }

    #[tokio::test]
    async fn test_transport_failure_on_submit() {
        let mut app = controller(FakeEndpoint {
            fail_submit: true,
            ..FakeEndpoint::with_users(&[("Ana", 1000, None)])
        });
        app.select_user("Ana").await;
        fill_form(&mut app);

        let err = app.submit().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(app.session().totals(), (1000, 40));
        assert!(app.session().can_submit());
        assert_eq!(app.banner().message(), Some(messages::SUBMIT_FAILED));
    }

    #[tokio::test]
    async fn test_user_data_failure_keeps_selection() {
        let mut app = controller(FakeEndpoint {
            fail_reads: true,
            ..Default::default()
        });
        assert!(!app.select_user("Ana").await);
        assert_eq!(app.session().user_name(), "Ana");
        assert_eq!(app.session().totals(), (0, 0));
        assert_eq!(app.banner().message(), Some(messages::USER_DATA_FAILED));
    }

    #[tokio::test]
    async fn test_empty_leaderboard_shows_placeholder() {
        let mut app = controller(FakeEndpoint::with_users(&[("Ana", 0, None)]));
        app.load().await;
        app.select_user("Ana").await;

        let screen = app.screen();
        assert_eq!(screen.leaderboard, Podium::Empty);
        assert_eq!(screen.rank_line, None);
    }

    #[tokio::test]
    async fn test_clearing_user_returns_to_idle() {
        let mut app = controller(FakeEndpoint::with_users(&[("Ana", 500, None)]));
        app.select_user("Ana").await;
        assert_eq!(app.session().totals(), (500, 20));

        app.select_user("").await;
        assert_eq!(app.phase(), Phase::Idle);
        assert_eq!(app.session().totals(), (0, 0));
        assert_eq!(app.screen().greeting, None);
    }

    #[tokio::test]
    async fn test_take_notice_clears_banner() {
        let mut app = controller(FakeEndpoint {
            fail_reads: true,
            ..Default::default()
        });
        app.load_participants().await;

        assert_eq!(app.take_notice().as_deref(), Some(messages::PARTICIPANTS_FAILED));
        assert_eq!(app.take_notice(), None);
    }
}
