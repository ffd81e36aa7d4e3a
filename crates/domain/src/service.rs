use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::{
    CreateError, DeleteError, WorkoutEntry, WorkoutID, WorkoutRepository, WorkoutService,
    WorkoutSet,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Vec<WorkoutEntry> {
        log_on_error!(self.repository.read_workouts(), "get", "workouts").unwrap_or_default()
    }

    async fn create_workout(
        &self,
        exercise: &str,
        sets: Vec<WorkoutSet>,
        now: DateTime<Utc>,
    ) -> Result<WorkoutEntry, CreateError> {
        let workout = match WorkoutEntry::new(WorkoutID::from_time(now), exercise, sets, now) {
            Ok(workout) => workout,
            Err(err) => {
                debug!("rejected workout: {err}");
                return Err(err.into());
            }
        };
        log_on_error!(
            self.repository.create_workout(workout),
            "create",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(self.repository.delete_workout(id), "delete", "workout")
    }

    async fn clear_workouts(&self) -> Result<(), DeleteError> {
        log_on_error!(self.repository.delete_workouts(), "delete", "workouts")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::{
        NameError, Rank, ReadError, StorageError, WorkoutError,
        tests::{date, set, workout},
    };

    use super::*;

    #[derive(Default)]
    struct Repository {
        workouts: RefCell<Vec<WorkoutEntry>>,
        broken: bool,
    }

    impl Repository {
        fn broken() -> Self {
            Self {
                workouts: RefCell::new(vec![]),
                broken: true,
            }
        }

        fn with(workouts: Vec<WorkoutEntry>) -> Self {
            Self {
                workouts: RefCell::new(workouts),
                broken: false,
            }
        }
    }

    impl WorkoutRepository for Repository {
        async fn read_workouts(&self) -> Result<Vec<WorkoutEntry>, ReadError> {
            if self.broken {
                return Err(StorageError::Malformed("broken".into()).into());
            }
            Ok(self.workouts.borrow().clone())
        }

        async fn create_workout(&self, workout: WorkoutEntry) -> Result<WorkoutEntry, CreateError> {
            if self.broken {
                return Err(StorageError::Other("broken".into()).into());
            }
            self.workouts.borrow_mut().insert(0, workout.clone());
            Ok(workout)
        }

        async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
            if self.broken {
                return Err(StorageError::Other("broken".into()).into());
            }
            self.workouts.borrow_mut().retain(|w| w.id != id);
            Ok(id)
        }

        async fn delete_workouts(&self) -> Result<(), DeleteError> {
            if self.broken {
                return Err(StorageError::Other("broken".into()).into());
            }
            self.workouts.borrow_mut().clear();
            Ok(())
        }
    }

    #[test]
    fn test_get_workouts_fails_soft() {
        let service = Service::new(Repository::broken());
        assert_eq!(block_on(service.get_workouts()), vec![]);
        assert_eq!(block_on(service.get_exercise_stats()), vec![]);
        assert_eq!(
            block_on(service.get_progress(&date(2024, 3, 10, 12)))
                .daily_series
                .len(),
            7
        );
    }

    #[test]
    fn test_create_workout() {
        let service = Service::new(Repository::default());
        let now = date(2024, 3, 1, 9);

        let created = block_on(service.create_workout(
            " Bench Press ",
            vec![set(10, 20.0), set(0, 20.0)],
            now,
        ))
        .unwrap();

        assert_eq!(
            created,
            WorkoutEntry {
                id: WorkoutID::from_time(now),
                exercise: crate::Name::new("Bench Press").unwrap(),
                sets: vec![set(10, 20.0)],
                date: now,
                total_volume: 200.0,
            }
        );
        assert_eq!(block_on(service.get_workouts()), vec![created]);
    }

    #[test]
    fn test_create_workout_inserts_at_front() {
        let service = Service::new(Repository::default());
        block_on(service.create_workout("Squat", vec![set(5, 100.0)], date(2024, 3, 1, 9)))
            .unwrap();
        block_on(service.create_workout("Curl", vec![set(10, 15.0)], date(2024, 3, 2, 9)))
            .unwrap();
        assert_eq!(
            block_on(service.get_workouts())
                .iter()
                .map(|w| w.exercise.to_string())
                .collect::<Vec<_>>(),
            vec!["Curl", "Squat"]
        );
    }

    #[test]
    fn test_create_workout_rejects_whitespace_name() {
        let service = Service::new(Repository::default());
        assert!(matches!(
            block_on(service.create_workout("   ", vec![set(10, 20.0)], date(2024, 3, 1, 9))),
            Err(CreateError::Validation(WorkoutError::Exercise(NameError::Empty)))
        ));
        assert_eq!(block_on(service.get_workouts()), vec![]);
    }

    #[test]
    fn test_create_workout_rejects_missing_sets() {
        let service = Service::new(Repository::default());
        assert!(matches!(
            block_on(service.create_workout("Squat", vec![set(0, 20.0)], date(2024, 3, 1, 9))),
            Err(CreateError::Validation(WorkoutError::NoValidSets))
        ));
        assert_eq!(block_on(service.get_workouts()), vec![]);
    }

    #[test]
    fn test_create_workout_propagates_storage_error() {
        let service = Service::new(Repository::broken());
        assert!(matches!(
            block_on(service.create_workout("Squat", vec![set(5, 100.0)], date(2024, 3, 1, 9))),
            Err(CreateError::Storage(StorageError::Other(_)))
        ));
    }

    #[test]
    fn test_delete_workout() {
        let service = Service::new(Repository::with(vec![
            workout("2", "Squat", &[set(5, 100.0)], date(2024, 3, 2, 9)),
            workout("1", "Squat", &[set(5, 100.0)], date(2024, 3, 1, 9)),
        ]));
        assert_eq!(
            block_on(service.delete_workout(WorkoutID::from("2"))).unwrap(),
            WorkoutID::from("2")
        );
        assert_eq!(
            block_on(service.get_workouts()),
            vec![workout("1", "Squat", &[set(5, 100.0)], date(2024, 3, 1, 9))]
        );
    }

    #[test]
    fn test_delete_workout_propagates_storage_error() {
        let service = Service::new(Repository::broken());
        assert!(block_on(service.delete_workout(WorkoutID::from("1"))).is_err());
        assert!(block_on(service.clear_workouts()).is_err());
    }

    #[test]
    fn test_clear_workouts() {
        let service = Service::new(Repository::with(vec![workout(
            "1",
            "Squat",
            &[set(5, 100.0)],
            date(2024, 3, 1, 9),
        )]));
        block_on(service.clear_workouts()).unwrap();
        assert_eq!(block_on(service.get_workouts()), vec![]);
    }

    #[test]
    fn test_get_exercise_stats() {
        let service = Service::new(Repository::with(vec![
            workout("2", "Squat", &[set(5, 120.0)], date(2024, 3, 2, 9)),
            workout("1", "Curl", &[set(10, 15.0)], date(2024, 3, 1, 9)),
        ]));
        assert_eq!(
            block_on(service.get_exercise_stats())
                .iter()
                .map(|s| (s.exercise.to_string(), s.rank))
                .collect::<Vec<_>>(),
            vec![
                ("Squat".to_string(), Rank::Silver),
                ("Curl".to_string(), Rank::Bronze)
            ]
        );
    }

    #[test]
    fn test_get_exercise_suggestions() {
        let service = Service::new(Repository::with(vec![
            workout("3", "Front Squat", &[set(5, 60.0)], date(2024, 3, 3, 9)),
            workout("2", "Squat", &[set(5, 120.0)], date(2024, 3, 2, 9)),
            workout("1", "Front Squat", &[set(5, 60.0)], date(2024, 3, 1, 9)),
        ]));
        let suggestions = block_on(service.get_exercise_suggestions());
        assert_eq!(suggestions.len(), crate::COMMON_EXERCISES.len() + 1);
        assert_eq!(suggestions[0], "Bench Press");
        assert_eq!(suggestions.last().map(String::as_str), Some("Front Squat"));
    }
}
