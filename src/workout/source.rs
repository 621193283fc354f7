use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::errors::WorkoutError;
use super::normalize::normalize_workout;
use super::raw::{RawId, RawWorkout};
use super::types::Workout;

/// Where workout documents come from.
///
/// Implemented by the REST client and by a directory of JSON files; mocked
/// in tests with `MockWorkoutSource`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait WorkoutSource: Send + Sync {
    /// Fetch a single workout document by its public id
    async fn fetch_workout(&self, id: &str) -> Result<RawWorkout, WorkoutError>;

    /// Fetch every workout visible to the signed-in account
    async fn list_workouts(&self) -> Result<Vec<RawWorkout>, WorkoutError>;
}

/// Fetch and normalize in one step. This is the only way the CLI obtains a
/// playable workout.
pub async fn load_workout(source: &dyn WorkoutSource, id: &str) -> Result<Workout, WorkoutError> {
    let mut raw = source.fetch_workout(id).await?;
    if raw.identifier().is_none() {
        raw.public_id = Some(RawId::Text(id.to_string()));
    }
    normalize_workout(raw)
}

/// Workouts stored as `<id>.json` files in a directory
#[derive(Debug, Clone)]
pub struct FileWorkoutSource {
    dir: PathBuf,
}

impl FileWorkoutSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_document(path: &Path) -> Result<RawWorkout, WorkoutError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        let value = super::client::unwrap_envelope(value)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Ids become file names and URL path segments; anything that could leave
/// that segment is refused
pub(crate) fn is_plain_workout_id(id: &str) -> bool {
    !id.is_empty() && !id.starts_with('.') && !id.contains(['/', '\\', '?', '#', '%'])
}

#[async_trait::async_trait]
impl WorkoutSource for FileWorkoutSource {
    async fn fetch_workout(&self, id: &str) -> Result<RawWorkout, WorkoutError> {
        if !is_plain_workout_id(id) {
            return Err(WorkoutError::NotFound(id.to_string()));
        }

        let path = self.dir.join(format!("{id}.json"));
        if !tokio::fs::try_exists(&path).await? {
            return Err(WorkoutError::NotFound(id.to_string()));
        }

        debug!(path = %path.display(), "Reading workout document");
        let mut raw = Self::read_document(&path).await?;
        if raw.identifier().is_none() {
            raw.public_id = Some(RawId::Text(id.to_string()));
        }
        Ok(raw)
    }

    async fn list_workouts(&self) -> Result<Vec<RawWorkout>, WorkoutError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut workouts = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::read_document(&path).await {
                Ok(mut raw) => {
                    if raw.identifier().is_none() {
                        let stem = path
                            .file_stem()
                            .and_then(|stem| stem.to_str())
                            .map(str::to_string);
                        raw.public_id = stem.map(RawId::Text);
                    }
                    workouts.push(raw);
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable workout document");
                }
            }
        }
        Ok(workouts)
    }
}
