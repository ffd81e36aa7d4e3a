pub mod add_workout;
pub mod leaderboard;
pub mod log;
pub mod progress;
pub mod settings;
pub mod workouts;
