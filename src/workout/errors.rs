use thiserror::Error;

/// Failures while fetching or normalizing workout documents.
///
/// None of these reach the session core: a workout either normalizes into
/// the strict shape or the caller reports the error and never starts a timer.
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("Workout '{0}' not found")]
    NotFound(String),
    #[error("Workout has no exercises")]
    NoExercises,
    #[error("Duplicate exercise id '{id}' at position {position}")]
    DuplicateExerciseId { id: String, position: usize },
    #[error("Workout document is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Studio API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Studio API rejected the request: {0}")]
    Rejected(String),
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid workout JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkoutError {
    /// Errors worth retrying from the caller's side (transient transport trouble)
    pub fn is_transient(&self) -> bool {
        match self {
            WorkoutError::Network(err) => err.is_timeout() || err.is_connect(),
            WorkoutError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
