use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use super::{workout_source, Command};
use crate::config::config;
use crate::display::{render_snapshot, render_summary};
use crate::player::{PlayerEvent, PlayerOutcome, SessionPlayer};
use crate::scheduler::IntervalTicker;
use crate::session::WorkoutSession;
use crate::shutdown::ShutdownCoordinator;
use crate::state::AppState;
use crate::workout::load_workout;

pub struct RunCommand {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub countdown: Option<u32>,
    pub tick_ms: Option<u64>,
    pub json: bool,
}

impl RunCommand {
    pub fn new(id: String, dir: Option<PathBuf>) -> Self {
        Self {
            id,
            dir,
            countdown: None,
            tick_ms: None,
            json: false,
        }
    }

    pub fn with_countdown(mut self, countdown: Option<u32>) -> Self {
        self.countdown = countdown;
        self
    }

    pub fn with_tick_ms(mut self, tick_ms: Option<u64>) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl Command for RunCommand {
    async fn execute(&self) -> Result<()> {
        let config = config()?;
        let state = AppState::from_config(&config.account);
        let user = state.require_signed_in()?;

        let source = workout_source(self.dir.as_deref(), &config.api)?;
        let workout = load_workout(source.as_ref(), &self.id)
            .await
            .with_context(|| format!("Failed to load workout '{}'", self.id))?;

        let countdown = self
            .countdown
            .unwrap_or(config.session.startup_countdown_seconds);
        let tick = Duration::from_millis(self.tick_ms.unwrap_or(config.session.tick_interval_ms));
        let session = WorkoutSession::new(&workout, countdown)?;
        info!(
            user_id = %user.user_id,
            session_id = %session.id(),
            workout_id = %workout.id,
            "Starting workout session"
        );

        let shutdown = ShutdownCoordinator::new();
        let signals = shutdown.install_signal_handlers();
        let (events_tx, mut events) = mpsc::channel(32);
        let player = SessionPlayer::new(session, IntervalTicker::new(tick), events_tx);
        let task = tokio::spawn(player.run(shutdown.subscribe()));

        let mut last_rendered = String::new();
        while let Some(event) = events.recv().await {
            match event {
                PlayerEvent::Snapshot(snapshot) if self.json => {
                    println!("{}", serde_json::to_string(&snapshot)?);
                }
                PlayerEvent::Snapshot(snapshot) => {
                    let rendered = render_snapshot(&snapshot, &workout);
                    if rendered != last_rendered {
                        println!("{rendered}");
                        last_rendered = rendered;
                    }
                }
                PlayerEvent::ExerciseCompleted { index, .. } if !self.json => {
                    if let Some(exercise) = workout.exercises.get(index) {
                        println!("✅ {} done", exercise.name);
                    }
                }
                PlayerEvent::ExerciseCompleted { .. } | PlayerEvent::Finished(_) => {}
            }
        }

        drop(signals);
        match ShutdownCoordinator::shutdown_all_services(task).await? {
            PlayerOutcome::Completed(summary) => {
                if self.json {
                    println!("{}", serde_json::to_string(&summary)?);
                } else {
                    println!("🎉 {}", render_summary(&summary));
                }
            }
            PlayerOutcome::Cancelled { last_snapshot } => {
                println!("⏹️  Session stopped during {}", last_snapshot.phase);
            }
        }
        Ok(())
    }
}
