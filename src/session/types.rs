use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Startup grace period before the first exercise, in ticks
pub const DEFAULT_STARTUP_COUNTDOWN: u32 = 5;

/// Coarse state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Countdown,
    Running,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Countdown => "Countdown",
            Phase::Running => "Running",
            Phase::Completed => "Completed",
        };
        f.write_str(name)
    }
}

/// Events fed into the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// One discrete one-second step
    Tick,
}

/// What happened while handling a tick, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// Countdown finished and the first exercise began
    Started,
    ExerciseCompleted { index: usize, exercise_id: String },
    /// Last exercise completed. Emitted exactly once per session.
    Finished,
}

/// Point-in-time view published to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_countdown: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_remaining_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<f64>,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub snapshot: SessionSnapshot,
    pub notices: Vec<SessionNotice>,
}

impl TickReport {
    pub fn finished(&self) -> bool {
        self.notices.contains(&SessionNotice::Finished)
    }
}

/// Record of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub workout_id: String,
    pub workout_name: String,
    pub exercise_count: usize,
    pub completed_count: usize,
    pub planned_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn elapsed_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Workout '{workout_id}' has no exercises; a session needs at least one")]
    NoExercises { workout_id: String },
}
