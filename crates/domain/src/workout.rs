use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, TimeZone, Utc};
use derive_more::{AsRef, Deref, Display};

use crate::{
    CreateError, DeleteError, ExerciseStats, Name, NameError, Progress, ReadError, aggregate,
    summarize,
};

/// Exercises offered for quick selection when logging a workout.
pub const COMMON_EXERCISES: [&str; 10] = [
    "Bench Press",
    "Squat",
    "Deadlift",
    "Overhead Press",
    "Barbell Row",
    "Pull-ups",
    "Dumbbell Curl",
    "Tricep Dips",
    "Leg Press",
    "Lat Pulldown",
];

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    /// Return all workouts, most recent first.
    ///
    /// Storage failures are not surfaced. They are logged and result in an
    /// empty list.
    async fn get_workouts(&self) -> Vec<WorkoutEntry>;
    async fn create_workout(
        &self,
        exercise: &str,
        sets: Vec<WorkoutSet>,
        now: DateTime<Utc>,
    ) -> Result<WorkoutEntry, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    async fn clear_workouts(&self) -> Result<(), DeleteError>;

    async fn get_exercise_stats(&self) -> Vec<ExerciseStats> {
        aggregate(&self.get_workouts().await)
    }

    async fn get_progress<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Progress {
        summarize(&self.get_workouts().await, now)
    }

    /// Common exercises followed by all other exercises logged so far.
    async fn get_exercise_suggestions(&self) -> Vec<String> {
        let mut suggestions = COMMON_EXERCISES
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        for (exercise, _) in group_by_exercise(&self.get_workouts().await) {
            if !suggestions.iter().any(|s| s == exercise.as_str()) {
                suggestions.push(exercise.to_string());
            }
        }
        suggestions
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<WorkoutEntry>, ReadError>;
    /// Store a workout in front of all existing workouts.
    async fn create_workout(&self, workout: WorkoutEntry) -> Result<WorkoutEntry, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    async fn delete_workouts(&self) -> Result<(), DeleteError>;
}

#[derive(AsRef, Deref, Debug, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(String);

impl WorkoutID {
    /// Derive an ID from the creation time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_time(time: DateTime<Utc>) -> Self {
        Self(time.timestamp_millis().to_string())
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSet {
    pub reps: u32,
    pub weight: f32,
}

impl WorkoutSet {
    /// Sets without reps or without weight are not counted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.reps > 0 && self.weight > 0.0
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let reps = self.reps as f32;
        reps * self.weight
    }
}

impl FromStr for WorkoutSet {
    type Err = SetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((reps, weight)) = s.split_once(['x', 'X', '×']) else {
            return Err(SetError::Format(s.to_string()));
        };
        let reps = reps
            .trim()
            .parse::<u32>()
            .map_err(|_| SetError::Reps(reps.trim().to_string()))?;
        let weight = match weight.trim().replace(',', ".").parse::<f32>() {
            Ok(parsed_weight) if parsed_weight.is_finite() && parsed_weight >= 0.0 => {
                parsed_weight
            }
            _ => return Err(SetError::Weight(weight.trim().to_string())),
        };
        Ok(Self { reps, weight })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SetError {
    #[error("Set must be given as REPSxWEIGHT ({0})")]
    Format(String),
    #[error("Reps must be a non-negative integer ({0})")]
    Reps(String),
    #[error("Weight must be a non-negative decimal number ({0})")]
    Weight(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub id: WorkoutID,
    pub exercise: Name,
    pub sets: Vec<WorkoutSet>,
    pub date: DateTime<Utc>,
    /// Sum of reps × weight over all sets, fixed at creation.
    pub total_volume: f32,
}

impl WorkoutEntry {
    /// Create a validated workout.
    ///
    /// Sets without reps or weight are dropped. At least one set must remain.
    pub fn new(
        id: WorkoutID,
        exercise: &str,
        sets: Vec<WorkoutSet>,
        date: DateTime<Utc>,
    ) -> Result<Self, WorkoutError> {
        let exercise = Name::new(exercise)?;
        let sets = sets
            .into_iter()
            .filter(WorkoutSet::is_valid)
            .collect::<Vec<_>>();

        if sets.is_empty() {
            return Err(WorkoutError::NoValidSets);
        }

        let total_volume = sets.iter().map(WorkoutSet::volume).sum();

        Ok(Self {
            id,
            exercise,
            sets,
            date,
            total_volume,
        })
    }

    /// Heaviest weight of all sets, or 0 if there are no sets.
    #[must_use]
    pub fn max_weight(&self) -> f32 {
        self.sets.iter().map(|s| s.weight).fold(0.0, f32::max)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WorkoutError {
    #[error(transparent)]
    Exercise(#[from] NameError),
    #[error("Please add at least one set with reps and weight")]
    NoValidSets,
}

/// Group workouts by exercise name.
///
/// Groups are ordered by first appearance. Inside a group the order of the
/// input is kept.
pub(crate) fn group_by_exercise(workouts: &[WorkoutEntry]) -> Vec<(&Name, Vec<&WorkoutEntry>)> {
    let mut index: BTreeMap<&Name, usize> = BTreeMap::new();
    let mut groups: Vec<(&Name, Vec<&WorkoutEntry>)> = vec![];

    for workout in workouts {
        if let Some(&i) = index.get(&workout.exercise) {
            groups[i].1.push(workout);
        } else {
            index.insert(&workout.exercise, groups.len());
            groups.push((&workout.exercise, vec![workout]));
        }
    }

    groups
}

pub(crate) fn max_weight(workouts: &[&WorkoutEntry]) -> f32 {
    workouts
        .iter()
        .map(|w| w.max_weight())
        .fold(0.0, f32::max)
}
