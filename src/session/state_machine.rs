use statig::prelude::*;
use tracing::{debug, info, warn};

use super::types::{Phase, SessionEvent};
use crate::workout::Exercise;

/// Session sequencer: startup countdown, then one timer per exercise.
///
/// Transitions are monotonic. There is no pause, skip or rewind: once the
/// countdown starts the session runs until the last exercise expires.
pub struct SessionMachine {
    session_id: String,
    exercises: Vec<Exercise>,
    current_index: usize,
    time_remaining: u32,
    startup_countdown: u32,
    phase: Phase,
}

impl SessionMachine {
    pub fn new(session_id: String, exercises: Vec<Exercise>, startup_countdown: u32) -> Self {
        Self {
            session_id,
            exercises,
            current_index: 0,
            time_remaining: 0,
            startup_countdown,
            phase: Phase::Countdown,
        }
    }
}

#[state_machine(initial = "State::countdown()")]
impl SessionMachine {
    #[state]
    fn countdown(&mut self, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::Tick => {
                self.startup_countdown = self.startup_countdown.saturating_sub(1);
                if self.startup_countdown > 0 {
                    debug!(
                        session_id = %self.session_id,
                        startup_countdown = self.startup_countdown,
                        "Countdown tick"
                    );
                    return Handled;
                }

                let Some(first) = self.exercises.first() else {
                    warn!(
                        session_id = %self.session_id,
                        "Countdown finished but there are no exercises; refusing to start"
                    );
                    return Handled;
                };

                self.current_index = 0;
                self.time_remaining = first.duration_seconds;
                self.phase = Phase::Running;
                info!(
                    session_id = %self.session_id,
                    exercise_id = %first.id,
                    duration_seconds = first.duration_seconds,
                    "Session started"
                );
                Transition(State::running())
            }
        }
    }

    #[state]
    fn running(&mut self, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::Tick => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining > 0 {
                    return Handled;
                }

                self.complete_current();

                let next = self.current_index + 1;
                if next < self.exercises.len() {
                    self.current_index = next;
                    self.time_remaining = self.exercises[next].duration_seconds;
                    info!(
                        session_id = %self.session_id,
                        index = next,
                        exercise_id = %self.exercises[next].id,
                        duration_seconds = self.time_remaining,
                        "Advanced to next exercise"
                    );
                    Handled
                } else {
                    self.phase = Phase::Completed;
                    info!(
                        session_id = %self.session_id,
                        exercises = self.exercises.len(),
                        "Session completed"
                    );
                    Transition(State::completed())
                }
            }
        }
    }

    #[state]
    fn completed(&mut self, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::Tick => {
                debug!(session_id = %self.session_id, "Tick after completion ignored");
                Handled
            }
        }
    }
}

impl SessionMachine {
    fn complete_current(&mut self) {
        let index = self.current_index;
        let exercise = &mut self.exercises[index];
        exercise.completed = true;
        debug!(
            session_id = %self.session_id,
            index = index,
            exercise_id = %exercise.id,
            "Exercise completed"
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn startup_countdown(&self) -> u32 {
        self.startup_countdown
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{ExerciseType, Media, MediaKind};

    fn exercise(id: &str, duration_seconds: u32) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: format!("Exercise {id}"),
            kind: ExerciseType::Cardio,
            duration_seconds,
            completed: false,
            instructions: None,
            tips: vec![],
            media: Media {
                url: "/videos/cardio-demo.mp4".to_string(),
                kind: MediaKind::Video,
            },
            target_muscles: vec![],
            sets: 1,
            reps: 0,
            rest_seconds: 30,
        }
    }

    #[test]
    fn test_countdown_then_running() {
        let mut sm = SessionMachine::new("s1".to_string(), vec![exercise("a", 3)], 2)
            .state_machine();

        sm.handle(&SessionEvent::Tick);
        assert_eq!(sm.inner().phase(), Phase::Countdown);
        assert_eq!(sm.inner().startup_countdown(), 1);

        sm.handle(&SessionEvent::Tick);
        assert_eq!(sm.inner().phase(), Phase::Running);
        assert_eq!(sm.inner().time_remaining(), 3);
    }

    #[test]
    fn test_empty_machine_refuses_to_run() {
        let mut sm = SessionMachine::new("s2".to_string(), vec![], 1).state_machine();

        for _ in 0..3 {
            sm.handle(&SessionEvent::Tick);
        }

        assert_eq!(sm.inner().phase(), Phase::Countdown);
        assert_eq!(sm.inner().startup_countdown(), 0);
        assert_eq!(sm.inner().time_remaining(), 0);
    }

    #[test]
    fn test_ticks_after_completion_change_nothing() {
        let mut sm = SessionMachine::new("s3".to_string(), vec![exercise("a", 1)], 1)
            .state_machine();

        sm.handle(&SessionEvent::Tick);
        sm.handle(&SessionEvent::Tick);
        assert_eq!(sm.inner().phase(), Phase::Completed);
        assert!(sm.inner().exercises()[0].completed);

        sm.handle(&SessionEvent::Tick);
        sm.handle(&SessionEvent::Tick);
        assert_eq!(sm.inner().phase(), Phase::Completed);
        assert_eq!(sm.inner().current_index(), 0);
        assert_eq!(sm.inner().time_remaining(), 0);
    }
}
