//! Terminal rendering for workouts and session snapshots

use crate::session::{Phase, SessionSnapshot, SessionSummary};
use crate::workout::{Exercise, MediaKind, Workout};

const BAR_WIDTH: usize = 20;

/// Zero-padded `MM:SS`. Minutes keep growing past 99.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Position in the workout; the exercise being performed counts as reached
pub fn overall_progress(snapshot: &SessionSnapshot, exercise_count: usize) -> f64 {
    match (snapshot.phase, snapshot.current_index) {
        (Phase::Completed, _) => 100.0,
        (Phase::Running, Some(index)) if exercise_count > 0 => {
            (index + 1) as f64 / exercise_count as f64 * 100.0
        }
        _ => 0.0,
    }
}

/// `3 x 12, rest 30s`, or `2 sets, rest 30s` for timed exercises without reps
pub fn format_volume(exercise: &Exercise) -> String {
    let work = match (exercise.sets, exercise.reps) {
        (1, 0) => "1 set".to_string(),
        (sets, 0) => format!("{sets} sets"),
        (sets, reps) => format!("{sets} x {reps}"),
    };
    format!("{work}, rest {}s", exercise.rest_seconds)
}

pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Lines shown for one snapshot of a session over `workout`
pub fn render_snapshot(snapshot: &SessionSnapshot, workout: &Workout) -> String {
    let total = workout.exercises.len();
    match snapshot.phase {
        Phase::Countdown => {
            let mut out = format!(
                "Get ready! {} starts in {}",
                workout.name,
                snapshot.startup_countdown.unwrap_or(0)
            );
            if let Some(first) = workout.exercises.first() {
                out.push_str(&format!("\n  First up: {} ({})", first.name, first.kind));
            }
            out
        }
        Phase::Running => {
            let index = snapshot.current_index.unwrap_or(0);
            let Some(exercise) = workout.exercises.get(index) else {
                return format!("Exercise {} of {}", index + 1, total);
            };
            let remaining = snapshot.time_remaining_seconds.unwrap_or(0);
            let progress = snapshot.progress_percent.unwrap_or(0.0);

            let mut lines = vec![
                format!("{} ({}) {}/{}", exercise.name, exercise.kind, index + 1, total),
                format!("  {}", format_volume(exercise)),
                format!("  {}  {}", format_clock(u64::from(remaining)), progress_bar(progress)),
                format!(
                    "  workout {} {:.0}%",
                    progress_bar(overall_progress(snapshot, total)),
                    overall_progress(snapshot, total)
                ),
            ];
            if let Some(tip) = exercise.tips.first() {
                lines.push(format!("  Tip: {tip}"));
            }
            match workout.exercises.get(index + 1) {
                Some(next) => lines.push(format!(
                    "  Next: {} ({})",
                    next.name,
                    format_clock(u64::from(next.duration_seconds))
                )),
                None => lines.push("  Last exercise!".to_string()),
            }
            lines.join("\n")
        }
        Phase::Completed => format!("Workout complete: {}", workout.name),
    }
}

pub fn render_summary(summary: &SessionSummary) -> String {
    format!(
        "Completed {} of {} exercises in {} ({} planned)\nSession {}",
        summary.completed_count,
        summary.exercise_count,
        format_clock(summary.elapsed_seconds().max(0) as u64),
        format_clock(summary.planned_seconds),
        summary.session_id
    )
}

pub fn render_workout(workout: &Workout) -> String {
    let mut lines = vec![format!(
        "{} [{}] - {} exercises, {}",
        workout.name,
        workout.id,
        workout.exercises.len(),
        format_clock(workout.total_duration_seconds())
    )];
    if let Some(description) = &workout.description {
        lines.push(format!("  {description}"));
    }
    for (i, exercise) in workout.exercises.iter().enumerate() {
        lines.push(format!(
            "  {}. {} ({}) {}",
            i + 1,
            exercise.name,
            exercise.kind,
            format_clock(u64::from(exercise.duration_seconds))
        ));
        if let Some(instructions) = &exercise.instructions {
            lines.push(format!("     {instructions}"));
        }
        lines.push(format!("     {}", format_volume(exercise)));
        if !exercise.target_muscles.is_empty() {
            lines.push(format!("     muscles: {}", exercise.target_muscles.join(", ")));
        }
        let media = match exercise.media.kind {
            MediaKind::Video => "video",
            MediaKind::Animation => "animation",
            MediaKind::Image => "image",
        };
        lines.push(format!("     {media}: {}", exercise.media.url));
    }
    lines.join("\n")
}

pub fn render_workout_list(workouts: &[Workout], company_name: Option<&str>) -> String {
    let title = company_name.unwrap_or("Gymflow");
    if workouts.is_empty() {
        return format!("{title}: no workouts available");
    }
    let mut lines = vec![format!("{title} workouts:")];
    for workout in workouts {
        lines.push(format!(
            "  {:<12} {} ({} exercises, {})",
            workout.id,
            workout.name,
            workout.exercises.len(),
            format_clock(workout.total_duration_seconds())
        ));
    }
    lines.join("\n")
}
