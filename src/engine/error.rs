use std::error::Error;
use std::fmt;

/// Error type for session operations.
///
/// Every variant is recoverable: the presentation layer decides what (if
/// anything) to show the user. Disabling a "previous" control is the
/// expected handling of `AtFirstQuestion`, not an error dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The question set handed to the session was unusable: empty, a
    /// question with fewer than two options, or a correct-option index out
    /// of range for its own options.
    InvalidConfiguration(String),
    /// `submit_answer` was called with an option index out of range for the
    /// current question. State is unchanged.
    InvalidAnswer {
        option_index: usize,
        num_options: usize,
    },
    /// The current question already has a recorded answer. The first answer
    /// is final; duplicate submits never re-score.
    AlreadyAnswered,
    /// The operation requires an in-progress session.
    SessionNotInProgress,
    /// `retreat` was called at the first question. State is unchanged.
    AtFirstQuestion,
    /// `result` was called before the session completed.
    SessionNotCompleted,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidConfiguration(reason) => {
                write!(f, "invalid quiz configuration: {}", reason)
            }
            SessionError::InvalidAnswer {
                option_index,
                num_options,
            } => write!(
                f,
                "option index {} out of range for a question with {} options",
                option_index, num_options
            ),
            SessionError::AlreadyAnswered => {
                write!(f, "the current question has already been answered")
            }
            SessionError::SessionNotInProgress => write!(f, "no quiz session is in progress"),
            SessionError::AtFirstQuestion => write!(f, "already at the first question"),
            SessionError::SessionNotCompleted => {
                write!(f, "the session has not been completed yet")
            }
        }
    }
}

impl Error for SessionError {}
