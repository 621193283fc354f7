//! Session player
//!
//! Drives a [`WorkoutSession`] from a [`TickSource`] and publishes what the
//! screen needs: a snapshot after every tick, a notice per finished exercise
//! and one final summary. The player owns the only live tick source; it is
//! restarted when the countdown hands over to the first exercise and dropped
//! as soon as the session completes or is cancelled.

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, Instrument};

use crate::scheduler::TickSource;
use crate::session::{SessionNotice, SessionSnapshot, SessionSummary, WorkoutSession};
use crate::telemetry::create_session_span;

/// Messages published to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Snapshot(SessionSnapshot),
    ExerciseCompleted { index: usize, exercise_id: String },
    /// Published once, after the final snapshot
    Finished(SessionSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerOutcome {
    Completed(SessionSummary),
    /// Stopped by a shutdown signal or because nobody is listening any more
    Cancelled { last_snapshot: SessionSnapshot },
}

impl PlayerOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, PlayerOutcome::Completed(_))
    }
}

enum Step {
    Tick,
    Idle,
    Cancel,
}

pub struct SessionPlayer<T: TickSource> {
    session: WorkoutSession,
    ticker: T,
    events: mpsc::Sender<PlayerEvent>,
}

impl<T: TickSource> SessionPlayer<T> {
    pub fn new(session: WorkoutSession, ticker: T, events: mpsc::Sender<PlayerEvent>) -> Self {
        Self {
            session,
            ticker,
            events,
        }
    }

    /// Play the session to the end, or until `shutdown` flips to true
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> PlayerOutcome {
        let span = create_session_span(
            &self.session.id().to_string(),
            self.session.workout_id(),
        );
        self.play(shutdown).instrument(span).await
    }

    async fn play(mut self, mut shutdown: watch::Receiver<bool>) -> PlayerOutcome {
        let started_at = Utc::now();
        info!(
            workout = %self.session.workout_name(),
            exercises = self.session.exercises().len(),
            "Session player started"
        );

        let cancelled_early = *shutdown.borrow_and_update();
        if cancelled_early || !self.publish(PlayerEvent::Snapshot(self.session.snapshot())).await {
            return self.cancel();
        }

        let mut shutdown_open = true;
        loop {
            let step = tokio::select! {
                biased;
                changed = shutdown.changed(), if shutdown_open => match changed {
                    Ok(()) if *shutdown.borrow_and_update() => Step::Cancel,
                    Ok(()) => Step::Idle,
                    Err(_) => {
                        // Sender dropped: nobody can cancel us any more
                        shutdown_open = false;
                        Step::Idle
                    }
                },
                _ = self.ticker.tick() => Step::Tick,
            };

            match step {
                Step::Cancel => return self.cancel(),
                Step::Idle => continue,
                Step::Tick => {}
            }

            let report = self.session.tick();
            let mut finished = false;
            for notice in report.notices {
                match notice {
                    SessionNotice::Started => {
                        debug!("Countdown finished, restarting tick source for exercise timing");
                        self.ticker.restart();
                    }
                    SessionNotice::ExerciseCompleted { index, exercise_id } => {
                        if !self
                            .publish(PlayerEvent::ExerciseCompleted { index, exercise_id })
                            .await
                        {
                            return self.cancel();
                        }
                    }
                    SessionNotice::Finished => finished = true,
                }
            }

            if !self.publish(PlayerEvent::Snapshot(report.snapshot)).await {
                return self.cancel();
            }

            if finished {
                let summary = self.session.summary(started_at, Utc::now());
                info!(
                    completed = summary.completed_count,
                    planned_seconds = summary.planned_seconds,
                    "Session finished"
                );
                // A listener that left right at the end changes nothing
                let _ = self.events.send(PlayerEvent::Finished(summary.clone())).await;
                return PlayerOutcome::Completed(summary);
            }
        }
    }

    async fn publish(&self, event: PlayerEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    fn cancel(self) -> PlayerOutcome {
        let last_snapshot = self.session.snapshot();
        info!(phase = %last_snapshot.phase, "Session player cancelled");
        PlayerOutcome::Cancelled { last_snapshot }
    }
}
