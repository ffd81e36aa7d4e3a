use liftrank_app::{Unit, chart};
use liftrank_domain as domain;

use crate::common;

/// Length of the bar of the day with the highest volume.
const BAR_WIDTH: f32 = 30.0;
const BAR: &str = "█";
/// Marker of a day without workouts.
const EMPTY_DAY: &str = "·";
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn view(progress: &domain::Progress, unit: Unit) -> String {
    if progress.by_exercise.is_empty() {
        return [
            "No Progress Yet",
            "Start logging workouts to see your progress!",
        ]
        .join("\n");
    }

    let mut lines = vec![
        "Last 7 Days".to_string(),
        format!(
            "  Workouts: {}   Volume: {}",
            progress.weekly.count,
            common::format_volume_k(progress.weekly.volume)
        ),
        String::new(),
        "Daily Volume".to_string(),
    ];

    let max_volume = progress.max_daily_volume();
    for bucket in &progress.daily_series {
        lines.push(view_day(bucket, max_volume));
    }

    lines.push(String::new());
    lines.push("By Exercise".to_string());

    for exercise in &progress.by_exercise {
        lines.extend(view_exercise(exercise, unit));
    }

    lines.join("\n")
}

fn view_day(bucket: &domain::DayBucket, max_volume: f32) -> String {
    let label = bucket.date.format("%a");
    if bucket.is_active() {
        format!(
            "  {label}  {} {}",
            BAR.repeat(bar_length(bucket, max_volume)),
            common::format_number(bucket.volume)
        )
    } else {
        format!("  {label}  {EMPTY_DAY}")
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_length(bucket: &domain::DayBucket, max_volume: f32) -> usize {
    (chart::bar_height(bucket, max_volume, BAR_WIDTH).round() as usize).max(1)
}

fn view_exercise(exercise: &domain::ExerciseProgress, unit: Unit) -> Vec<String> {
    let mut lines = vec![
        if exercise.is_improving {
            format!("  {}  ↗ improving", exercise.exercise)
        } else {
            format!("  {}", exercise.exercise)
        },
        format!(
            "    Sessions: {}   Total: {}   Avg: {}   Max: {}",
            exercise.sessions,
            common::format_weight(exercise.total_volume, unit),
            common::format_weight(exercise.avg_volume.round(), unit),
            common::format_weight(exercise.max_weight, unit),
        ),
    ];
    if exercise.recent_volumes.len() > 1 {
        lines.push(format!(
            "    Recent sessions: {}",
            sparkline(&exercise.recent_volumes)
        ));
    }
    lines
}

/// One block per value, scaled to the largest value.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn sparkline(values: &[f32]) -> String {
    let max = values.iter().copied().fold(0.0, f32::max);
    values
        .iter()
        .map(|value| {
            let level = if max > 0.0 {
                (value / max * SPARK_LEVELS.len() as f32).ceil() as usize
            } else {
                1
            };
            SPARK_LEVELS[level.clamp(1, SPARK_LEVELS.len()) - 1]
        })
        .collect()
}
