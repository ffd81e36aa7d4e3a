use std::{cmp::Ordering, fmt};

use chrono::{DateTime, Utc};

use crate::{Name, WorkoutEntry, group_by_exercise, max_weight};

pub const GOLD_TOTAL_VOLUME: f32 = 15000.0;
pub const GOLD_MAX_WEIGHT: f32 = 200.0;
pub const SILVER_TOTAL_VOLUME: f32 = 5000.0;
pub const SILVER_MAX_WEIGHT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Bronze,
    Silver,
    Gold,
}

impl Rank {
    /// Classify the cumulative performance of an exercise.
    ///
    /// Reaching either the volume or the weight threshold of a rank is
    /// sufficient.
    #[must_use]
    pub fn classify(total_volume: f32, max_weight: f32) -> Self {
        if total_volume >= GOLD_TOTAL_VOLUME || max_weight >= GOLD_MAX_WEIGHT {
            Rank::Gold
        } else if total_volume >= SILVER_TOTAL_VOLUME || max_weight >= SILVER_MAX_WEIGHT {
            Rank::Silver
        } else {
            Rank::Bronze
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Bronze => "Bronze",
                Rank::Silver => "Silver",
                Rank::Gold => "Gold",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStats {
    pub exercise: Name,
    pub total_workouts: u32,
    pub max_weight: f32,
    pub total_volume: f32,
    pub rank: Rank,
    pub last_workout: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RankCounts {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

/// Calculate ranked statistics for every exercise.
///
/// The result is ordered by rank (highest first) and by total volume
/// (highest first) within the same rank. Exercises with equal rank and
/// volume keep the order of their first appearance in `workouts`.
#[must_use]
pub fn aggregate(workouts: &[WorkoutEntry]) -> Vec<ExerciseStats> {
    let mut stats = group_by_exercise(workouts)
        .into_iter()
        .filter_map(|(exercise, workouts)| {
            let total_volume = workouts.iter().map(|w| w.total_volume).sum::<f32>();
            let max_weight = max_weight(&workouts);
            Some(ExerciseStats {
                exercise: exercise.clone(),
                total_workouts: u32::try_from(workouts.len()).unwrap_or(u32::MAX),
                max_weight,
                total_volume,
                rank: Rank::classify(total_volume, max_weight),
                last_workout: workouts.iter().map(|w| w.date).max()?,
            })
        })
        .collect::<Vec<_>>();

    stats.sort_by(|a, b| match b.rank.cmp(&a.rank) {
        Ordering::Equal => b.total_volume.total_cmp(&a.total_volume),
        ordering => ordering,
    });

    stats
}

#[must_use]
pub fn rank_counts(stats: &[ExerciseStats]) -> RankCounts {
    stats
        .iter()
        .fold(RankCounts::default(), |mut counts, s| {
            match s.rank {
                Rank::Gold => counts.gold += 1,
                Rank::Silver => counts.silver += 1,
                Rank::Bronze => counts.bronze += 1,
            }
            counts
        })
}
