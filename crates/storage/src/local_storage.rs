use std::collections::VecDeque;

use chrono::{DateTime, SecondsFormat, Utc};
use liftrank_app::{self as app, Settings, log};
use liftrank_domain as domain;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use crate::{Error, KeyValueStore};

/// Repository for all persistent data of the application.
///
/// Every collection is stored as a single JSON document under a fixed key.
/// A modification reads the whole collection, changes it in memory and
/// writes it back.
pub struct LocalStorage<S> {
    store: S,
}

impl<S> LocalStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[derive(AsRefStr, Clone, Copy)]
enum Key {
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

impl<S: KeyValueStore> LocalStorage<S> {
    fn read<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, Error> {
        Ok(match self.store.get(key.as_ref())? {
            Some(value) => Some(serde_json::from_str(&value)?),
            None => None,
        })
    }

    fn write<T: Serialize>(&self, key: Key, value: &T) -> Result<(), Error> {
        self.store.set(key.as_ref(), &serde_json::to_string(value)?)
    }

    fn read_workout_list(&self) -> Result<Vec<domain::WorkoutEntry>, domain::StorageError> {
        self.read::<Vec<Workout>>(Key::Workouts)
            .map_err(storage_error)?
            .unwrap_or_default()
            .into_iter()
            .map(domain::WorkoutEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| domain::StorageError::Malformed(err.to_string()))
    }

    fn write_workout_list(
        &self,
        workouts: &[domain::WorkoutEntry],
    ) -> Result<(), domain::StorageError> {
        self.write(
            Key::Workouts,
            &workouts.iter().map(Workout::from).collect::<Vec<_>>(),
        )
        .map_err(storage_error)
    }
}

fn storage_error(err: Error) -> domain::StorageError {
    match err {
        Error::Serde(err) => domain::StorageError::Malformed(err.to_string()),
        err => domain::StorageError::Other(Box::new(err)),
    }
}

impl<S: KeyValueStore> domain::WorkoutRepository for LocalStorage<S> {
    async fn read_workouts(&self) -> Result<Vec<domain::WorkoutEntry>, domain::ReadError> {
        Ok(self.read_workout_list()?)
    }

    async fn create_workout(
        &self,
        workout: domain::WorkoutEntry,
    ) -> Result<domain::WorkoutEntry, domain::CreateError> {
        let mut workouts = self.read_workout_list()?;
        if workouts.iter().any(|w| w.id == workout.id) {
            return Err(domain::CreateError::Conflict);
        }
        workouts.insert(0, workout.clone());
        self.write_workout_list(&workouts)?;
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let mut workouts = self.read_workout_list()?;
        workouts.retain(|w| w.id != id);
        self.write_workout_list(&workouts)?;
        Ok(id)
    }

    async fn delete_workouts(&self) -> Result<(), domain::DeleteError> {
        self.store
            .remove(Key::Workouts.as_ref())
            .map_err(storage_error)?;
        Ok(())
    }
}

impl<S: KeyValueStore> app::SettingsRepository for LocalStorage<S> {
    async fn read_settings(&self) -> Result<Settings, String> {
        self.read(Key::Settings)
            .map(Option::unwrap_or_default)
            .map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        self.write(Key::Settings, &settings)
            .map_err(|err| err.to_string())
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> log::Repository for LocalStorage<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.read(Key::Log)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::MAX_ENTRIES);
        self.write(Key::Log, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

/// Persisted form of a workout.
///
/// Numbers are read into `f32`. Weights and volumes with more than about
/// seven significant digits lose precision when they are written back.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub exercise: String,
    pub sets: Vec<WorkoutSet>,
    pub date: String,
    pub total_volume: f32,
}

impl From<domain::WorkoutEntry> for Workout {
    fn from(value: domain::WorkoutEntry) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::WorkoutEntry> for Workout {
    fn from(value: &domain::WorkoutEntry) -> Self {
        Self {
            id: value.id.to_string(),
            exercise: value.exercise.to_string(),
            sets: value.sets.iter().copied().map(WorkoutSet::from).collect(),
            date: value.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_volume: value.total_volume,
        }
    }
}

impl TryFrom<Workout> for domain::WorkoutEntry {
    type Error = ConversionError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            exercise: domain::Name::new(&value.exercise)?,
            sets: value.sets.into_iter().map(domain::WorkoutSet::from).collect(),
            date: DateTime::parse_from_rfc3339(&value.date)?.with_timezone(&Utc),
            total_volume: value.total_volume,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSet {
    pub reps: u32,
    pub weight: f32,
}

impl From<domain::WorkoutSet> for WorkoutSet {
    fn from(value: domain::WorkoutSet) -> Self {
        Self {
            reps: value.reps,
            weight: value.weight,
        }
    }
}

impl From<WorkoutSet> for domain::WorkoutSet {
    fn from(value: WorkoutSet) -> Self {
        Self {
            reps: value.reps,
            weight: value.weight,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error("invalid exercise: {0}")]
    Name(#[from] domain::NameError),
    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),
}
