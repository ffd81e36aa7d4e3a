#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod name;
mod progress;
mod ranking;
mod service;
mod workout;

pub use error::{CreateError, DeleteError, ReadError, StorageError};
pub use name::{Name, NameError};
pub use progress::{
    DAYS, DayBucket, ExerciseProgress, Progress, RECENT_WORKOUTS, WeeklyStats, summarize,
};
pub use ranking::{
    ExerciseStats, GOLD_MAX_WEIGHT, GOLD_TOTAL_VOLUME, Rank, RankCounts, SILVER_MAX_WEIGHT,
    SILVER_TOTAL_VOLUME, aggregate, rank_counts,
};
pub use service::Service;
pub use workout::{
    COMMON_EXERCISES, SetError, WorkoutEntry, WorkoutError, WorkoutID, WorkoutRepository,
    WorkoutService, WorkoutSet,
};

use workout::{group_by_exercise, max_weight};
