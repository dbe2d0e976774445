use thiserror::Error;

/// Errors raised by [`crate::engine::SessionEngine`] control operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown exercise: {0}")]
    InvalidExercise(String),

    #[error("session duration must be a positive number of minutes, got {0}")]
    InvalidDuration(u32),

    #[error("exercise {0} has no phase with a positive duration")]
    DegenerateProfile(String),

    #[error("no session is running")]
    NotRunning,
}
