// Loose document shapes as the studio backend serves them.
// Every field is optional; normalize.rs turns these into the strict types.

use serde::{Deserialize, Serialize};

/// Identifiers arrive as strings (public ids) or integers (row ids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    pub fn into_string(self) -> Option<String> {
        match self {
            RawId::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawId::Number(number) => Some(number.to_string()),
        }
    }
}

/// Target muscles are stored as a list, but forms submit them JSON-encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMuscles {
    List(Vec<String>),
    Encoded(String),
}

impl RawMuscles {
    pub fn into_list(self) -> Vec<String> {
        match self {
            RawMuscles::List(list) => list,
            RawMuscles::Encoded(encoded) => {
                serde_json::from_str::<Vec<String>>(&encoded).unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMediaFile {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExercise {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub public_id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, alias = "durationSeconds")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tips: Option<Vec<String>>,
    #[serde(default)]
    pub media_file: Option<RawMediaFile>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub target_muscles: Option<RawMuscles>,
    #[serde(default)]
    pub sets: Option<i64>,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub rest_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkout {
    #[serde(default)]
    pub public_id: Option<RawId>,
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Option<Vec<RawExercise>>,
}

impl RawWorkout {
    /// Public id wins over the row id, matching how workouts are addressed in URLs
    pub fn identifier(&self) -> Option<String> {
        self.public_id
            .clone()
            .and_then(RawId::into_string)
            .or_else(|| self.id.clone().and_then(RawId::into_string))
    }
}

/// One page of the workout listing endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutPage {
    pub workouts: Vec<RawWorkout>,
    pub total_pages: u32,
    pub current_page: u32,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_exercise_accepts_backend_document() {
        let json = r#"{
            "completed": false,
            "duration": 120,
            "id": 1,
            "instructions": "Keep the back straight",
            "mediaFile": { "url": "https://cdn.example.com/squat.gif", "type": "image", "name": "squat.gif" },
            "name": "Squat",
            "publicId": "e7fa15a1-ad7e-4836-b725-9518e438c0c5",
            "reps": 0,
            "restTime": 30,
            "sets": 1,
            "targetMuscles": [],
            "tips": ["Breathe"],
            "type": "warmup",
            "weight": 0
        }"#;

        let raw: RawExercise = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id, Some(RawId::Number(1)));
        assert_eq!(raw.duration, Some(120));
        assert_eq!(raw.kind.as_deref(), Some("warmup"));
        assert_eq!(
            raw.media_file.unwrap().url.as_deref(),
            Some("https://cdn.example.com/squat.gif")
        );
    }

    #[test]
    fn test_encoded_muscles_are_decoded() {
        let muscles = RawMuscles::Encoded(r#"["Glutes","Quadriceps"]"#.to_string());
        assert_eq!(muscles.into_list(), vec!["Glutes", "Quadriceps"]);

        let garbage = RawMuscles::Encoded("not json".to_string());
        assert!(garbage.into_list().is_empty());
    }

    #[test]
    fn test_identifier_prefers_public_id() {
        let workout = RawWorkout {
            public_id: Some(RawId::Text("0fd01bb2".to_string())),
            id: Some(RawId::Number(7)),
            ..Default::default()
        };
        assert_eq!(workout.identifier().as_deref(), Some("0fd01bb2"));

        let blank_public = RawWorkout {
            public_id: Some(RawId::Text("  ".to_string())),
            id: Some(RawId::Number(7)),
            ..Default::default()
        };
        assert_eq!(blank_public.identifier().as_deref(), Some("7"));
    }
}
