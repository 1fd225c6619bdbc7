//! Client state
//!
//! [`ClientState`] is everything one page holds: the session, the leaderboard, the
//! roster and the banner. Each endpoint call is split into a synchronous step that
//! prepares it and one that applies its result, so a front end only has to await
//! the endpoint in between. [`Controller`](crate::Controller) drives it directly;
//! the browser client drives it from inside a signal.

use chrono::NaiveDate;

use crate::endpoint::{sort_participants, Participant, SubmitReceipt, UserRecord};
use crate::error::{ChallengeError, ChallengeResult};
use crate::leaderboard::{LeaderboardEntry, RefreshTicket, Standings};
use crate::notice::{messages, Banner, NoticeTicket};
use crate::render::{self, Screen};
use crate::screenshot::Screenshot;
use crate::session::{Phase, PickTicket, Session, Submission};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    session: Session,
    standings: Standings,
    roster: Vec<Participant>,
    roster_ready: bool,
    banner: Banner,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    /// Participants sorted alphabetically
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    /// False until the participant list has loaded; the selector stays disabled
    pub fn roster_ready(&self) -> bool {
        self.roster_ready
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Current rank of the selected participant
    pub fn rank(&self) -> Option<usize> {
        self.standings.rank_of(self.session.user_name())
    }

    pub fn screen(&self, today: NaiveDate) -> Screen {
        render::screen(&self.session, &self.standings, today)
    }

    // ============ Banner ============

    fn notify(&mut self, message: impl Into<String>) -> NoticeTicket {
        self.banner.show(message)
    }

    /// Ticket of the visible message, for scheduling its dismissal
    pub fn notice_ticket(&self) -> Option<NoticeTicket> {
        self.banner.ticket()
    }

    pub fn expire_notice(&mut self, ticket: NoticeTicket) -> bool {
        self.banner.expire(ticket)
    }

    /// Hand the visible message to the caller and clear the banner
    pub fn take_notice(&mut self) -> Option<String> {
        self.banner.dismiss()
    }

    // ============ Participants ============

    pub fn participants_loaded(&mut self, result: ChallengeResult<Vec<Participant>>) -> bool {
        match result {
            Ok(mut participants) => {
                sort_participants(&mut participants);
                tracing::info!(count = participants.len(), "Participants loaded");
                self.roster = participants;
                self.roster_ready = true;
                true
            }
            Err(e) => {
                tracing::error!("Error fetching participants: {}", e);
                self.roster_ready = false;
                self.notify(messages::PARTICIPANTS_FAILED);
                false
            }
        }
    }

    // ============ Selection ============

    /// Select a participant. Returns whether their record needs fetching.
    pub fn select_user(&mut self, user_name: &str) -> bool {
        self.session.select_user(user_name);
        !user_name.is_empty()
    }

    /// Apply a fetched record.
    ///
    /// On failure the selection is kept and the totals stay zeroed.
    pub fn user_record_loaded(
        &mut self,
        user_name: &str,
        result: ChallengeResult<UserRecord>,
        today: NaiveDate,
    ) -> bool {
        match result {
            Ok(record) => {
                self.session.apply_user_record(user_name, &record, today);
                tracing::debug!(
                    user = user_name,
                    submitted_today = self.session.submitted_today(),
                    "User data loaded"
                );
                true
            }
            Err(e) => {
                tracing::error!(user = user_name, "Error loading user data: {}", e);
                self.notify(messages::USER_DATA_FAILED);
                false
            }
        }
    }

    // ============ Form ============

    pub fn choose_activity(&mut self, activity: &str) {
        self.session.choose_activity(activity);
    }

    pub fn choose_duration(&mut self, minutes: u32) {
        self.session.choose_duration(minutes);
    }

    pub fn set_manual_steps(&mut self, raw: &str) {
        self.session.set_manual_steps(raw);
    }

    pub fn attach_screenshot(&mut self, screenshot: Option<Screenshot>) {
        self.session.attach_screenshot(screenshot);
    }

    pub fn begin_pick(&mut self) -> PickTicket {
        self.session.begin_pick()
    }

    pub fn finish_pick(&mut self, ticket: PickTicket, screenshot: Option<Screenshot>) -> bool {
        self.session.finish_pick(ticket, screenshot)
    }

    // ============ Leaderboard ============

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.standings.begin_refresh()
    }

    /// Apply a leaderboard response and sync the selected participant's totals.
    ///
    /// Returns false for a failure or a response older than one already applied.
    pub fn leaderboard_loaded(
        &mut self,
        ticket: RefreshTicket,
        result: ChallengeResult<Vec<LeaderboardEntry>>,
    ) -> bool {
        match result {
            Ok(entries) => {
                if !self.standings.apply(ticket, entries) {
                    return false;
                }
                tracing::debug!(entries = self.standings.entries().len(), "Leaderboard updated");

                if let Some(entry) = self.standings.entry_for(self.session.user_name()) {
                    self.session.sync_totals(entry);
                }
                true
            }
            Err(e) => {
                tracing::error!("Error fetching leaderboard: {}", e);
                self.notify(messages::LEADERBOARD_FAILED);
                false
            }
        }
    }

    // ============ Submission ============

    /// Validate the form and lock it for submission.
    ///
    /// Local validation failures are reported on the banner and never reach the
    /// endpoint.
    pub fn begin_submit(&mut self, today: NaiveDate) -> ChallengeResult<Submission> {
        self.session.begin_submit(today).map_err(|e| {
            if let Some(message) = messages::submit_failure(&e) {
                self.notify(message);
            }
            e
        })
    }

    /// Apply the endpoint's answer to a submission.
    ///
    /// On success the totals grow and the form resets; the caller refreshes the
    /// leaderboard next.
    pub fn submit_finished(
        &mut self,
        submission: &Submission,
        result: ChallengeResult<SubmitReceipt>,
    ) -> ChallengeResult<()> {
        match result.and_then(SubmitReceipt::into_result) {
            Ok(_) => {
                tracing::info!(
                    user = %submission.payload.user_name,
                    steps = submission.derived.steps,
                    calories = submission.derived.calories,
                    "Daily activity recorded"
                );
                self.session.complete_submit(submission);
                self.notify(messages::SUBMIT_OK);
                Ok(())
            }
            Err(e) => {
                self.session.fail_submit();
                if let ChallengeError::Rejected(reason) = &e {
                    tracing::warn!("Submission rejected: {:?}", reason);
                } else {
                    tracing::error!("Error saving daily submission: {}", e);
                }
                if let Some(message) = messages::submit_failure(&e) {
                    self.notify(message);
                }
                Err(e)
            }
        }
    }
}
