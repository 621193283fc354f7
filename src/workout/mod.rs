// Workout data: fetching from the studio backend and normalizing
// into the strict shape the session player consumes

pub mod client;
pub mod errors;
pub mod normalize;
pub mod raw;
pub mod source;
pub mod types;

pub use client::WorkoutClient;
pub use errors::WorkoutError;
pub use normalize::normalize_workout;
pub use raw::{RawExercise, RawWorkout, WorkoutPage};
pub use source::{load_workout, FileWorkoutSource, WorkoutSource};
pub use types::{Exercise, ExerciseType, Media, MediaKind, Workout};

#[cfg(any(test, feature = "testing"))]
pub use source::MockWorkoutSource;
