use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

use crate::config::ApiConfig;
use crate::observability::OperationTimer;
use crate::workout::{normalize_workout, FileWorkoutSource, Workout, WorkoutClient, WorkoutSource};

pub mod config;
pub mod list;
pub mod run;
pub mod show;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// Directory source when `dir` is given, studio API otherwise
pub fn workout_source(dir: Option<&Path>, api: &ApiConfig) -> Result<Box<dyn WorkoutSource>> {
    match dir {
        Some(dir) => Ok(Box::new(FileWorkoutSource::new(dir))),
        None => {
            let client = WorkoutClient::new(api)
                .with_context(|| format!("Failed to create studio client for {}", api.base_url))?;
            Ok(Box::new(client))
        }
    }
}

/// Fetch and normalize every workout, skipping the ones that cannot be played
pub async fn load_all_workouts(source: &dyn WorkoutSource) -> Result<Vec<Workout>> {
    let timer = OperationTimer::new("list_workouts");
    let raw = source
        .list_workouts()
        .await
        .context("Failed to list workouts")?;
    timer.finish();

    let mut workouts = Vec::with_capacity(raw.len());
    for item in raw {
        let label = item.identifier().unwrap_or_else(|| "<no id>".to_string());
        match normalize_workout(item) {
            Ok(workout) => workouts.push(workout),
            Err(e) => warn!(workout_id = %label, error = %e, "Skipping workout"),
        }
    }
    Ok(workouts)
}

pub async fn show_how_to_get_work() -> Result<()> {
    println!("🏋️ Gymflow - Guided Workout Sessions");
    println!();
    println!("To get started:");
    println!("  📋 gymflow list             # See available workouts");
    println!("  🔍 gymflow show <ID>        # Inspect a workout");
    println!("  ▶️  gymflow run <ID>         # Play a guided session");
    println!();
    println!("Setup:");
    println!("  ⚙️  gymflow config           # Show effective configuration");
    println!();
    println!("💡 Add --dir <DIR> to use local <id>.json files instead of the studio API.");
    Ok(())
}
