use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exercise category. Informational only: the session timer treats every
/// type the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Cardio,
    #[default]
    Strength,
    Warmup,
    Cooldown,
    Flexibility,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 5] = [
        ExerciseType::Cardio,
        ExerciseType::Strength,
        ExerciseType::Warmup,
        ExerciseType::Cooldown,
        ExerciseType::Flexibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Cardio => "cardio",
            ExerciseType::Strength => "strength",
            ExerciseType::Warmup => "warmup",
            ExerciseType::Cooldown => "cooldown",
            ExerciseType::Flexibility => "flexibility",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExerciseType(pub String);

impl fmt::Display for UnknownExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown exercise type '{}'", self.0)
    }
}

impl std::error::Error for UnknownExerciseType {}

impl FromStr for ExerciseType {
    type Err = UnknownExerciseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ExerciseType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownExerciseType(s.to_string()))
    }
}

/// How a demonstration file should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Looping muted clip (mp4, webm, ogg, mov)
    Video,
    /// Animated image (gif)
    Animation,
    /// Anything else is shown as a still image
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    pub kind: MediaKind,
}

/// A single timed exercise in its strict, normalized shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExerciseType,
    pub duration_seconds: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    pub media: Media,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub rest_seconds: u32,
}

/// A workout ready to be played: at least one exercise, unique ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    pub fn total_duration_seconds(&self) -> u64 {
        self.exercises
            .iter()
            .map(|exercise| u64::from(exercise.duration_seconds))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_type_parsing_is_case_insensitive() {
        assert_eq!("Cardio".parse::<ExerciseType>().unwrap(), ExerciseType::Cardio);
        assert_eq!(" WARMUP ".parse::<ExerciseType>().unwrap(), ExerciseType::Warmup);
        assert!("hiit".parse::<ExerciseType>().is_err());
    }

    #[test]
    fn test_exercise_serializes_type_field() {
        let exercise = Exercise {
            id: "1".to_string(),
            name: "Plank".to_string(),
            kind: ExerciseType::Flexibility,
            duration_seconds: 45,
            completed: false,
            instructions: None,
            tips: vec![],
            media: Media {
                url: "/videos/default-demo.mp4".to_string(),
                kind: MediaKind::Video,
            },
            target_muscles: vec![],
            sets: 1,
            reps: 0,
            rest_seconds: 30,
        };

        let json = serde_json::to_value(&exercise).unwrap();
        assert_eq!(json["type"], "flexibility");
        assert_eq!(json["durationSeconds"], 45);
        assert!(json.get("instructions").is_none());
    }
}
