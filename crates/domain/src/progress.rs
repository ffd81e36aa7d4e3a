use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::{Name, WorkoutEntry, group_by_exercise, max_weight};

/// Number of calendar days covered by the daily series.
pub const DAYS: usize = 7;

/// Number of most recent workouts considered for the trend of an exercise.
pub const RECENT_WORKOUTS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub weekly: WeeklyStats,
    /// One bucket per calendar day, oldest first.
    pub daily_series: Vec<DayBucket>,
    pub by_exercise: Vec<ExerciseProgress>,
}

impl Progress {
    /// Largest daily volume, but at least 1.
    #[must_use]
    pub fn max_daily_volume(&self) -> f32 {
        self.daily_series
            .iter()
            .map(|d| d.volume)
            .fold(1.0, f32::max)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WeeklyStats {
    pub count: u32,
    pub volume: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: u32,
    pub volume: f32,
}

impl DayBucket {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgress {
    pub exercise: Name,
    pub sessions: u32,
    pub total_volume: f32,
    pub avg_volume: f32,
    pub max_weight: f32,
    /// Volumes of the most recent workouts, oldest first.
    pub recent_volumes: Vec<f32>,
    pub is_improving: bool,
}

/// Summarize the progress up to `now`.
///
/// The workouts must be ordered most recent first, as they are returned by
/// the repository. The trend of an exercise is derived from the first
/// workouts of each exercise in that order.
///
/// The weekly stats cover the 7 × 24 hours before `now`. The daily series
/// covers the calendar day of `now` and the six days before it, in the time
/// zone of `now`.
#[must_use]
pub fn summarize<Tz: TimeZone>(workouts: &[WorkoutEntry], now: &DateTime<Tz>) -> Progress {
    Progress {
        weekly: weekly_stats(workouts, now),
        daily_series: daily_series(workouts, now),
        by_exercise: exercise_progress(workouts),
    }
}

fn weekly_stats<Tz: TimeZone>(workouts: &[WorkoutEntry], now: &DateTime<Tz>) -> WeeklyStats {
    let week_ago = now.with_timezone(&Utc) - Duration::days(7);
    workouts
        .iter()
        .filter(|w| w.date >= week_ago)
        .fold(WeeklyStats::default(), |mut stats, w| {
            stats.count += 1;
            stats.volume += w.total_volume;
            stats
        })
}

fn daily_series<Tz: TimeZone>(workouts: &[WorkoutEntry], now: &DateTime<Tz>) -> Vec<DayBucket> {
    let timezone = now.timezone();
    let today = now.date_naive();
    let days = workouts
        .iter()
        .map(|w| (w.date.with_timezone(&timezone).date_naive(), w.total_volume))
        .collect::<Vec<_>>();

    (0..DAYS)
        .rev()
        .map(|i| {
            #[allow(clippy::cast_possible_wrap)]
            let date = today - Duration::days(i as i64);
            days.iter().filter(|(d, _)| *d == date).fold(
                DayBucket {
                    date,
                    count: 0,
                    volume: 0.0,
                },
                |mut bucket, (_, volume)| {
                    bucket.count += 1;
                    bucket.volume += volume;
                    bucket
                },
            )
        })
        .collect()
}

fn exercise_progress(workouts: &[WorkoutEntry]) -> Vec<ExerciseProgress> {
    let mut groups = group_by_exercise(workouts);
    groups.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

    groups
        .into_iter()
        .map(|(exercise, workouts)| {
            let total_volume = workouts.iter().map(|w| w.total_volume).sum::<f32>();
            #[allow(clippy::cast_precision_loss)]
            let avg_volume = total_volume / workouts.len() as f32;
            let recent_volumes = workouts
                .iter()
                .take(RECENT_WORKOUTS)
                .rev()
                .map(|w| w.total_volume)
                .collect::<Vec<_>>();
            ExerciseProgress {
                exercise: exercise.clone(),
                sessions: u32::try_from(workouts.len()).unwrap_or(u32::MAX),
                total_volume,
                avg_volume,
                max_weight: max_weight(&workouts),
                is_improving: is_improving(&recent_volumes),
                recent_volumes,
            }
        })
        .collect()
}

/// Compare the oldest and the newest of the given volumes.
///
/// This only looks at the two end points and is not a regression.
fn is_improving(volumes: &[f32]) -> bool {
    match (volumes.first(), volumes.last()) {
        (Some(first), Some(last)) if volumes.len() >= 2 => last > first,
        _ => false,
    }
}
