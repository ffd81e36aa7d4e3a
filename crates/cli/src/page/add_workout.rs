use liftrank_app::Unit;
use liftrank_domain as domain;

use crate::common;

pub fn view_created(workout: &domain::WorkoutEntry, unit: Unit) -> String {
    format!(
        "Saved {} with {} {}, total volume {} (#{})",
        workout.exercise,
        workout.sets.len(),
        if workout.sets.len() == 1 { "set" } else { "sets" },
        common::format_weight(workout.total_volume, unit),
        workout.id
    )
}

/// Exercises for quick selection.
pub fn view_exercises(exercises: &[String]) -> String {
    exercises
        .iter()
        .map(|e| format!("  {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
