//! Client error types
//!
//! Every failure the client can hit, grouped the way the UI reacts to them.

use thiserror::Error;

/// Errors that can occur while talking to the endpoint or validating the form
#[derive(Error, Debug)]
pub enum ChallengeError {
    /// Request never produced a response (connection refused, timeout, CORS)
    #[error("Network error: {0}")]
    Transport(String),

    /// Endpoint answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Response body was not the JSON we expected
    #[error("Parse error: {0}")]
    Decode(String),

    /// Endpoint answered `success: false`
    #[error("Submission rejected: {}", .0.as_deref().unwrap_or("Desconocido"))]
    Rejected(Option<String>),

    /// Form is missing a user, activity, duration, step count or screenshot
    #[error("Form is incomplete")]
    Incomplete,

    /// Participant already has an activity recorded for today
    #[error("Activity already recorded today for {0}")]
    AlreadySubmitted(String),

    /// A submission is already in flight
    #[error("Submission already in progress")]
    Busy,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classes of [`ChallengeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request rejected, unreachable endpoint, bad status or unreadable body
    Transport,
    /// Endpoint reported a logical failure
    Rejected,
    /// Local form validation failed; no request was sent
    Validation,
    /// Local environment problem (config, files)
    Local,
}

impl ChallengeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChallengeError::Transport(_) | ChallengeError::Status(_) | ChallengeError::Decode(_) => {
                ErrorKind::Transport
            }
            ChallengeError::Rejected(_) => ErrorKind::Rejected,
            ChallengeError::Incomplete
            | ChallengeError::AlreadySubmitted(_)
            | ChallengeError::Busy => ErrorKind::Validation,
            ChallengeError::Config(_) | ChallengeError::Io(_) => ErrorKind::Local,
        }
    }
}

impl From<serde_json::Error> for ChallengeError {
    fn from(err: serde_json::Error) -> Self {
        ChallengeError::Decode(err.to_string())
    }
}

/// Result type alias for client operations
pub type ChallengeResult<T> = Result<T, ChallengeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChallengeError::Status(502);
        assert_eq!(err.to_string(), "HTTP error! status: 502");

        let err = ChallengeError::Rejected(None);
        assert_eq!(err.to_string(), "Submission rejected: Desconocido");

        let err = ChallengeError::Rejected(Some("Duplicado".to_string()));
        assert_eq!(err.to_string(), "Submission rejected: Duplicado");
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(ChallengeError::Transport("refused".into()).kind(), ErrorKind::Transport);
        assert_eq!(ChallengeError::Decode("eof".into()).kind(), ErrorKind::Transport);
        assert_eq!(ChallengeError::Rejected(None).kind(), ErrorKind::Rejected);
        assert_eq!(ChallengeError::Incomplete.kind(), ErrorKind::Validation);
        assert_eq!(
            ChallengeError::AlreadySubmitted("Ana".into()).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ChallengeError = json_err.into();
        assert!(matches!(err, ChallengeError::Decode(_)));
    }
}
