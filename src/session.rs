//! Form state machine
//!
//! [`Session`] is everything the client holds for the current page lifetime: the
//! selected participant, the half-filled activity form and the participant's running
//! totals. Fields are private; every change goes through one of the transition
//! methods so the phase progression stays auditable:
//!
//! ```text
//! Idle → UserSelected → FormPartial → FormComplete → Submitting → SubmittedToday
//!                            ↑                            │
//!                            └──────── failure ───────────┘
//! ```

use chrono::NaiveDate;

use crate::activity::{derive, parse_manual_steps, Derived};
use crate::date::day_string;
use crate::endpoint::{SubmitPayload, UserRecord};
use crate::error::{ChallengeError, ChallengeResult};
use crate::leaderboard::LeaderboardEntry;
use crate::screenshot::Screenshot;

/// Where the form currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No participant selected
    Idle,
    /// Participant selected, form untouched
    UserSelected,
    /// Some but not all form fields filled
    FormPartial,
    /// Every field filled and nothing recorded today
    FormComplete,
    /// Submission in flight
    Submitting,
    /// Activity already recorded today for this participant
    SubmittedToday,
}

/// An accepted submission waiting for the endpoint's answer
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub payload: SubmitPayload,
    pub derived: Derived,
}

/// Sequence number of one screenshot pick; reads finish asynchronously
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickTicket(u64);

/// Client-held selection and totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user_name: String,
    activity: String,
    duration: u32,
    manual_steps: String,
    screenshot: Option<Screenshot>,
    submitted_today: bool,
    total_steps: u64,
    total_calories: u64,
    submitting: bool,
    picks: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Accessors ============

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn manual_steps(&self) -> &str {
        &self.manual_steps
    }

    pub fn screenshot(&self) -> Option<&Screenshot> {
        self.screenshot.as_ref()
    }

    pub fn submitted_today(&self) -> bool {
        self.submitted_today
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn totals(&self) -> (u64, u64) {
        (self.total_steps, self.total_calories)
    }

    pub fn phase(&self) -> Phase {
        if self.user_name.is_empty() {
            Phase::Idle
        } else if self.submitting {
            Phase::Submitting
        } else if self.submitted_today {
            Phase::SubmittedToday
        } else if self.is_form_complete() {
            Phase::FormComplete
        } else if self.has_form_input() {
            Phase::FormPartial
        } else {
            Phase::UserSelected
        }
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.phase() == Phase::FormComplete
    }

    fn is_form_complete(&self) -> bool {
        !self.user_name.is_empty()
            && !self.activity.is_empty()
            && self.duration != 0
            && !self.manual_steps.is_empty()
            && self.screenshot.is_some()
    }

    fn has_form_input(&self) -> bool {
        !self.activity.is_empty()
            || self.duration != 0
            || !self.manual_steps.is_empty()
            || self.screenshot.is_some()
    }

    // ============ Transitions ============

    /// Select a participant, or clear the selection with an empty name.
    ///
    /// Totals and the submitted-today flag are zeroed until the participant's record
    /// arrives via [`Session::apply_user_record`].
    pub fn select_user(&mut self, user_name: &str) {
        if user_name == self.user_name {
            return;
        }
        self.user_name = user_name.to_string();
        self.total_steps = 0;
        self.total_calories = 0;
        self.submitted_today = false;
    }

    /// Apply a fetched record if it belongs to the selected participant
    pub fn apply_user_record(
        &mut self,
        user_name: &str,
        record: &UserRecord,
        today: NaiveDate,
    ) -> bool {
        if user_name.is_empty() || user_name != self.user_name {
            return false;
        }
        self.total_steps = record.total_steps;
        self.total_calories = record.total_calories;
        self.submitted_today =
            record.last_submission_date.as_deref() == Some(day_string(today).as_str());
        true
    }

    pub fn choose_activity(&mut self, activity: &str) {
        self.activity = activity.to_string();
    }

    pub fn choose_duration(&mut self, minutes: u32) {
        self.duration = minutes;
    }

    /// Store the raw manual step field; it is parsed when submitting
    pub fn set_manual_steps(&mut self, raw: &str) {
        self.manual_steps = raw.to_string();
    }

    /// Attach a screenshot, or clear it with `None`.
    ///
    /// Supersedes any pick still being read.
    pub fn attach_screenshot(&mut self, screenshot: Option<Screenshot>) {
        self.picks += 1;
        self.screenshot = screenshot;
    }

    /// Start reading a picked file
    pub fn begin_pick(&mut self) -> PickTicket {
        self.picks += 1;
        PickTicket(self.picks)
    }

    /// Attach the result of a pick unless a newer pick, a direct attach or a
    /// completed submission happened since it started
    pub fn finish_pick(&mut self, ticket: PickTicket, screenshot: Option<Screenshot>) -> bool {
        if ticket.0 != self.picks {
            return false;
        }
        self.screenshot = screenshot;
        true
    }

    /// Take the selected participant's totals from a leaderboard entry
    pub fn sync_totals(&mut self, entry: &LeaderboardEntry) {
        if !self.user_name.is_empty() && entry.user_name == self.user_name {
            self.total_steps = entry.total_steps;
            self.total_calories = entry.total_calories;
        }
    }

    /// Validate the form and enter [`Phase::Submitting`].
    ///
    /// Fails without changing anything when the form is incomplete or the participant
    /// already has an activity recorded today.
    pub fn begin_submit(&mut self, today: NaiveDate) -> ChallengeResult<Submission> {
        if self.submitting {
            return Err(ChallengeError::Busy);
        }
        if !self.is_form_complete() {
            return Err(ChallengeError::Incomplete);
        }
        if self.submitted_today {
            return Err(ChallengeError::AlreadySubmitted(self.user_name.clone()));
        }

        let screenshot = match &self.screenshot {
            Some(s) => s.data_url().to_string(),
            None => return Err(ChallengeError::Incomplete),
        };

        let derived = derive(
            &self.activity,
            self.duration,
            parse_manual_steps(&self.manual_steps),
        );

        let payload = SubmitPayload {
            user_name: self.user_name.clone(),
            steps: derived.steps,
            calories: derived.calories,
            activity: self.activity.clone(),
            duration: self.duration,
            screenshot,
            today_date: day_string(today),
        };

        self.submitting = true;
        Ok(Submission { payload, derived })
    }

    /// Record a successful submission.
    ///
    /// Totals move only if the submission belongs to the still-selected participant.
    /// The form fields are cleared either way; the selection stays.
    pub fn complete_submit(&mut self, submission: &Submission) {
        self.submitting = false;
        if submission.payload.user_name == self.user_name {
            self.total_steps += submission.derived.steps;
            self.total_calories += submission.derived.calories;
            self.submitted_today = true;
        }
        self.activity.clear();
        self.duration = 0;
        self.manual_steps.clear();
        self.screenshot = None;
        self.picks += 1;
    }

    /// Return to the pre-submit phase after a failed submission
    pub fn fail_submit(&mut self) {
        self.submitting = false;
    }
}
