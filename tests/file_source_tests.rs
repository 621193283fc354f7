use gymflow::workout::{load_workout, ExerciseType, FileWorkoutSource, MediaKind, WorkoutError, WorkoutSource};

const ENVELOPED: &str = r#"{
  "success": true,
  "data": {
    "publicId": "leg-day",
    "name": "Leg day",
    "exercises": [
      { "id": 1, "name": "Squats", "type": "strength", "duration": 45,
        "mediaFile": { "url": "https://cdn.example.com/squat.GIF?v=2" } },
      { "name": "Stretch", "type": "yoga", "duration": 0 },
      { "id": "3", "name": "Jog", "type": "Cardio", "duration": -5, "tips": ["  "] }
    ]
  }
}"#;

const BARE: &str = r#"{
  "name": "Quick core",
  "exercises": [ { "id": "a", "name": "Plank", "type": "strength", "duration": 30 } ]
}"#;

#[tokio::test]
async fn test_load_workout_from_directory_normalizes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("leg-day.json"), ENVELOPED).unwrap();

    let source = FileWorkoutSource::new(dir.path());
    let workout = load_workout(&source, "leg-day").await.unwrap();

    assert_eq!(workout.id, "leg-day");
    assert_eq!(workout.exercises.len(), 3);

    let squats = &workout.exercises[0];
    assert_eq!(squats.id, "1");
    assert_eq!(squats.duration_seconds, 45);
    assert_eq!(squats.media.kind, MediaKind::Animation);

    let stretch = &workout.exercises[1];
    assert_eq!(stretch.id, "2");
    assert_eq!(stretch.kind, ExerciseType::Strength);
    assert_eq!(stretch.duration_seconds, 60);
    assert_eq!(stretch.media.url, "/videos/strength-demo.mp4");

    let jog = &workout.exercises[2];
    assert_eq!(jog.kind, ExerciseType::Cardio);
    assert_eq!(jog.duration_seconds, 0);
    assert!(!jog.tips.is_empty());
    assert!(jog.tips.iter().all(|tip| !tip.trim().is_empty()));
}

#[tokio::test]
async fn test_missing_and_unsafe_ids_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileWorkoutSource::new(dir.path());

    for id in ["nope", "../etc/passwd", ".hidden", ""] {
        let err = source.fetch_workout(id).await.unwrap_err();
        assert!(matches!(err, WorkoutError::NotFound(_)), "id {id:?} gave {err:?}");
    }
}

#[tokio::test]
async fn test_list_skips_unreadable_documents_and_uses_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a-leg-day.json"), ENVELOPED).unwrap();
    std::fs::write(dir.path().join("b-core.json"), BARE).unwrap();
    std::fs::write(dir.path().join("c-broken.json"), "{ not json").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let source = FileWorkoutSource::new(dir.path());
    let listed = source.list_workouts().await.unwrap();

    let ids: Vec<String> = listed.iter().filter_map(|w| w.identifier()).collect();
    assert_eq!(ids, vec!["leg-day".to_string(), "b-core".to_string()]);
}

#[tokio::test]
async fn test_rejected_envelope_surfaces_message() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("gone.json"),
        r#"{ "success": false, "message": "Workout archived" }"#,
    )
    .unwrap();

    let source = FileWorkoutSource::new(dir.path());
    let err = load_workout(&source, "gone").await.unwrap_err();
    assert!(matches!(err, WorkoutError::Rejected(ref message) if message == "Workout archived"));
}

#[tokio::test]
async fn test_workout_without_exercises_cannot_be_played() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("empty.json"), r#"{ "id": "empty", "exercises": [] }"#).unwrap();

    let source = FileWorkoutSource::new(dir.path());
    let err = load_workout(&source, "empty").await.unwrap_err();
    assert!(matches!(err, WorkoutError::NoExercises));
}
