//! Workout normalization
//!
//! Turns loosely-shaped backend documents into the strict [`Workout`] shape
//! before anything reaches the session core. Missing values get the same
//! defaults the studio front end applies: 60 second exercises, strength as
//! the default type, and type-specific fallback tips and demo media.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::errors::WorkoutError;
use super::raw::{RawExercise, RawId, RawMuscles, RawWorkout};
use super::types::{Exercise, ExerciseType, Media, MediaKind, Workout};

pub const DEFAULT_DURATION_SECONDS: u32 = 60;
pub const DEFAULT_REST_SECONDS: u32 = 30;

static VIDEO_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg|mov)$").expect("valid video pattern"));
static ANIMATION_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.gif$").expect("valid gif pattern"));

const GENERIC_TIPS: [&str; 5] = [
    "Keep correct posture throughout the exercise",
    "Breathe steadily and with control",
    "Drink water to stay hydrated",
    "Wear clothing suited to the activity",
    "Respect your limits and progress gradually",
];

/// Validate and fill a raw workout document
pub fn normalize_workout(raw: RawWorkout) -> Result<Workout, WorkoutError> {
    let id = raw.identifier().ok_or(WorkoutError::MissingField("id"))?;
    let name = non_blank(raw.name).unwrap_or_else(|| "Untitled workout".to_string());

    let raw_exercises = raw.exercises.unwrap_or_default();
    if raw_exercises.is_empty() {
        return Err(WorkoutError::NoExercises);
    }

    let mut seen = HashSet::new();
    let mut exercises = Vec::with_capacity(raw_exercises.len());
    for (position, raw_exercise) in raw_exercises.into_iter().enumerate() {
        let exercise = normalize_exercise(raw_exercise, position);
        if !seen.insert(exercise.id.clone()) {
            return Err(WorkoutError::DuplicateExerciseId {
                id: exercise.id,
                position: position + 1,
            });
        }
        exercises.push(exercise);
    }

    debug!(workout_id = %id, exercises = exercises.len(), "Workout normalized");

    Ok(Workout {
        id,
        name,
        description: non_blank(raw.description),
        exercises,
    })
}

fn normalize_exercise(raw: RawExercise, position: usize) -> Exercise {
    let id = raw
        .id
        .and_then(RawId::into_string)
        .or_else(|| raw.public_id.and_then(RawId::into_string))
        .unwrap_or_else(|| (position + 1).to_string());

    let kind = match raw.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        None => ExerciseType::default(),
        Some(text) => text.parse().unwrap_or_else(|err| {
            warn!(exercise_id = %id, error = %err, "Falling back to default exercise type");
            ExerciseType::default()
        }),
    };

    // A zero duration from the backend means "not set"
    let duration_seconds = match raw.duration {
        None | Some(0) => DEFAULT_DURATION_SECONDS,
        Some(seconds) => clamp_non_negative(seconds),
    };

    let tips = match raw.tips {
        Some(tips) if tips.iter().any(|tip| !tip.trim().is_empty()) => tips
            .into_iter()
            .filter(|tip| !tip.trim().is_empty())
            .collect(),
        _ => fallback_tips(kind),
    };

    let media_url = raw
        .media_file
        .and_then(|file| non_blank(file.url))
        .or_else(|| non_blank(raw.video))
        .unwrap_or_else(|| fallback_media_url(kind).to_string());

    Exercise {
        name: non_blank(raw.name).unwrap_or_else(|| format!("Exercise {}", position + 1)),
        id,
        kind,
        duration_seconds,
        completed: false,
        instructions: non_blank(raw.instructions),
        tips,
        media: Media {
            kind: media_kind(&media_url),
            url: media_url,
        },
        target_muscles: raw
            .target_muscles
            .map(RawMuscles::into_list)
            .unwrap_or_default(),
        sets: raw.sets.map(clamp_non_negative).unwrap_or(1),
        reps: raw.reps.map(clamp_non_negative).unwrap_or(0),
        rest_seconds: raw
            .rest_time
            .map(clamp_non_negative)
            .unwrap_or(DEFAULT_REST_SECONDS),
    }
}

/// Negative counts collapse to zero
fn clamp_non_negative(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Classify a media URL by extension, ignoring any query string or fragment
pub fn media_kind(url: &str) -> MediaKind {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    if VIDEO_EXTENSION.is_match(path) {
        MediaKind::Video
    } else if ANIMATION_EXTENSION.is_match(path) {
        MediaKind::Animation
    } else {
        MediaKind::Image
    }
}

pub fn fallback_media_url(kind: ExerciseType) -> &'static str {
    match kind {
        ExerciseType::Cardio => "/videos/cardio-demo.mp4",
        ExerciseType::Strength => "/videos/strength-demo.mp4",
        ExerciseType::Warmup => "/gifs/warmup-demo.gif",
        ExerciseType::Cooldown | ExerciseType::Flexibility => "/videos/default-demo.mp4",
    }
}

pub fn fallback_tips(kind: ExerciseType) -> Vec<String> {
    let tips: &[&str] = match kind {
        ExerciseType::Cardio => &[
            "Keep an upright posture during the whole exercise",
            "Control your breathing: in through the nose, out through the mouth",
            "Adjust the intensity to your conditioning",
        ],
        ExerciseType::Strength => &[
            "Keep your core braced during the movement",
            "Move in a controlled way",
            "Do not lock your joints at the end of the movement",
        ],
        ExerciseType::Warmup => &[
            "Start with light, controlled movements",
            "Increase the range of motion gradually",
            "Follow your body's rhythm without forcing it",
        ],
        ExerciseType::Cooldown | ExerciseType::Flexibility => &GENERIC_TIPS,
    };
    tips.iter().map(|tip| tip.to_string()).collect()
}
