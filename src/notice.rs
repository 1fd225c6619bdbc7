//! Notification banner
//!
//! One transient message slot. A new message replaces the current one at once and
//! restarts the dismissal countdown; there is no queue.

/// How long a message stays visible, in milliseconds
pub const NOTICE_TTL_MS: u64 = 3000;

/// Identifies one `show` call so a stale dismissal timer can be ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTicket(u64);

/// Single-slot banner state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banner {
    message: Option<String>,
    generation: u64,
}

impl Banner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message, replacing whatever is visible.
    ///
    /// The caller schedules [`Banner::expire`] with the returned ticket after
    /// [`NOTICE_TTL_MS`].
    pub fn show(&mut self, message: impl Into<String>) -> NoticeTicket {
        self.generation += 1;
        self.message = Some(message.into());
        NoticeTicket(self.generation)
    }

    /// Dismiss the message if it is still the one the ticket was issued for
    pub fn expire(&mut self, ticket: NoticeTicket) -> bool {
        if ticket.0 == self.generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    /// Clear the banner immediately, returning what was shown
    pub fn dismiss(&mut self) -> Option<String> {
        self.message.take()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Ticket of the visible message, if any
    pub fn ticket(&self) -> Option<NoticeTicket> {
        self.message.as_ref().map(|_| NoticeTicket(self.generation))
    }
}

/// User-facing texts
pub mod messages {
    pub const PARTICIPANTS_FAILED: &str = "Error al cargar la lista de participantes.";
    pub const USER_DATA_FAILED: &str = "Error al cargar datos del usuario.";
    pub const LEADERBOARD_FAILED: &str = "Error al cargar el tablero de clasificación.";
    pub const INCOMPLETE: &str = "Por favor, completa toda la información antes de registrar.";
    pub const ALREADY_SUBMITTED: &str =
        "¡Ya has registrado tu actividad diaria hoy para este usuario!";
    pub const SUBMIT_OK: &str =
        "¡Actividad diaria registrada exitosamente! ¡Sigue así, campeón!";
    pub const SUBMIT_FAILED: &str = "Error al registrar la actividad diaria.";

    use crate::error::ChallengeError;

    /// Message for an endpoint-reported rejection
    pub fn rejected(reason: Option<&str>) -> String {
        format!("Error al registrar: {}", reason.unwrap_or("Desconocido"))
    }

    /// Message for a failed submission; `None` when the attempt is silently ignored
    pub fn submit_failure(err: &ChallengeError) -> Option<String> {
        match err {
            ChallengeError::Incomplete => Some(INCOMPLETE.to_string()),
            ChallengeError::AlreadySubmitted(_) => Some(ALREADY_SUBMITTED.to_string()),
            ChallengeError::Rejected(reason) => Some(rejected(reason.as_deref())),
            ChallengeError::Busy => None,
            _ => Some(SUBMIT_FAILED.to_string()),
        }
    }
}
