use chrono::{DateTime, Utc};
use statig::prelude::*;
use uuid::Uuid;

use super::state_machine::SessionMachine;
use super::types::{
    Phase, SessionError, SessionEvent, SessionNotice, SessionSnapshot, SessionSummary,
    TickReport,
};
use crate::workout::{Exercise, Workout};

/// One run-through of a workout.
///
/// Owns the sequencer state machine. Callers drive it with [`tick`](Self::tick)
/// once per second and render the returned snapshot.
pub struct WorkoutSession {
    id: Uuid,
    workout_id: String,
    workout_name: String,
    machine: StateMachine<SessionMachine>,
}

impl WorkoutSession {
    /// Build a session. Empty workouts are rejected here so the timer is
    /// never started for them.
    pub fn new(workout: &Workout, startup_countdown: u32) -> Result<Self, SessionError> {
        if workout.exercises.is_empty() {
            return Err(SessionError::NoExercises {
                workout_id: workout.id.clone(),
            });
        }

        let id = Uuid::new_v4();
        let exercises = workout
            .exercises
            .iter()
            .cloned()
            .map(|exercise| Exercise {
                completed: false,
                ..exercise
            })
            .collect();

        let machine =
            SessionMachine::new(id.to_string(), exercises, startup_countdown).state_machine();

        Ok(Self {
            id,
            workout_id: workout.id.clone(),
            workout_name: workout.name.clone(),
            machine,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn workout_id(&self) -> &str {
        &self.workout_id
    }

    pub fn workout_name(&self) -> &str {
        &self.workout_name
    }

    /// Advance one step and report what happened
    pub fn tick(&mut self) -> TickReport {
        let phase_before = self.phase();
        let completed_before: Vec<bool> = self.exercises().iter().map(|e| e.completed).collect();

        self.machine.handle(&SessionEvent::Tick);

        let mut notices = Vec::new();
        if phase_before == Phase::Countdown && self.phase() != Phase::Countdown {
            notices.push(SessionNotice::Started);
        }
        for (index, (exercise, was_completed)) in
            self.exercises().iter().zip(completed_before).enumerate()
        {
            if exercise.completed && !was_completed {
                notices.push(SessionNotice::ExerciseCompleted {
                    index,
                    exercise_id: exercise.id.clone(),
                });
            }
        }
        if phase_before != Phase::Completed && self.is_completed() {
            notices.push(SessionNotice::Finished);
        }

        TickReport {
            snapshot: self.snapshot(),
            notices,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let ctx = self.machine.inner();
        match ctx.phase() {
            Phase::Countdown => SessionSnapshot {
                phase: Phase::Countdown,
                startup_countdown: Some(ctx.startup_countdown()),
                current_index: None,
                time_remaining_seconds: None,
                progress_percent: None,
            },
            Phase::Running => SessionSnapshot {
                phase: Phase::Running,
                startup_countdown: None,
                current_index: Some(ctx.current_index()),
                time_remaining_seconds: Some(ctx.time_remaining()),
                progress_percent: self.progress_percent(),
            },
            Phase::Completed => SessionSnapshot {
                phase: Phase::Completed,
                startup_countdown: None,
                current_index: None,
                time_remaining_seconds: None,
                progress_percent: None,
            },
        }
    }

    pub fn phase(&self) -> Phase {
        self.machine.inner().phase()
    }

    pub fn is_completed(&self) -> bool {
        self.phase() == Phase::Completed
    }

    pub fn startup_countdown(&self) -> u32 {
        self.machine.inner().startup_countdown()
    }

    pub fn current_index(&self) -> usize {
        self.machine.inner().current_index()
    }

    pub fn time_remaining(&self) -> u32 {
        self.machine.inner().time_remaining()
    }

    pub fn exercises(&self) -> &[Exercise] {
        self.machine.inner().exercises()
    }

    /// Exercise under the cursor while running
    pub fn current_exercise(&self) -> Option<&Exercise> {
        match self.phase() {
            Phase::Running => self.exercises().get(self.current_index()),
            _ => None,
        }
    }

    /// Exercise that will follow the current one (the first one during countdown)
    pub fn next_exercise(&self) -> Option<&Exercise> {
        match self.phase() {
            Phase::Countdown => self.exercises().first(),
            Phase::Running => self.exercises().get(self.current_index() + 1),
            Phase::Completed => None,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.exercises().iter().filter(|e| e.completed).count()
    }

    /// Share of the current exercise already done, 0 to 100.
    ///
    /// Zero-length exercises report 0 rather than dividing by zero.
    pub fn progress_percent(&self) -> Option<f64> {
        let exercise = self.current_exercise()?;
        let duration = exercise.duration_seconds;
        if duration == 0 {
            return Some(0.0);
        }
        let elapsed = duration.saturating_sub(self.time_remaining());
        Some(f64::from(elapsed) / f64::from(duration) * 100.0)
    }

    /// Position in the workout as shown on the session screen: the current
    /// exercise counts as reached
    pub fn overall_progress_percent(&self) -> f64 {
        let total = self.exercises().len();
        match self.phase() {
            Phase::Countdown => 0.0,
            Phase::Running if total > 0 => {
                (self.current_index() + 1) as f64 / total as f64 * 100.0
            }
            Phase::Running => 0.0,
            Phase::Completed => 100.0,
        }
    }

    pub fn planned_seconds(&self) -> u64 {
        self.exercises()
            .iter()
            .map(|e| u64::from(e.duration_seconds))
            .sum()
    }

    pub fn summary(&self, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            workout_id: self.workout_id.clone(),
            workout_name: self.workout_name.clone(),
            exercise_count: self.exercises().len(),
            completed_count: self.completed_count(),
            planned_seconds: self.planned_seconds(),
            started_at,
            finished_at,
        }
    }
}
