use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

static CONSOLE_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Warn as usize);

/// Number of entries kept in the persistent log.
pub const MAX_ENTRIES: usize = 100;

#[allow(clippy::missing_errors_doc)]
pub trait Service {
    fn get_log_entries(&self) -> Result<VecDeque<Entry>, Error>;
}

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

/// Install the logger.
///
/// Messages up to `console_level` are written to stderr. Messages of level
/// info and above are additionally persisted in `repository`.
///
/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(
    repository: Arc<Mutex<dyn Repository>>,
    console_level: LevelFilter,
) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    CONSOLE_LEVEL.store(console_level as usize, Ordering::Relaxed);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() as usize <= CONSOLE_LEVEL.load(Ordering::Relaxed)
            || metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();

        if record.level() as usize <= CONSOLE_LEVEL.load(Ordering::Relaxed) {
            eprintln!("{}: {message}", record.level().as_str().to_lowercase());
        }

        if record.level() <= Level::Info {
            if let Ok(log) = LOG.lock() {
                if let Some(ref repository) = *log {
                    if let Ok(repository) = repository.lock() {
                        if let Some(failure) = persist(
                            &*repository,
                            Entry {
                                time: Local::now().format("%b %d %H:%M:%S").to_string(),
                                level: record.level(),
                                message,
                            },
                            CONSOLE_LEVEL.load(Ordering::Relaxed),
                        ) {
                            eprintln!("{failure}");
                        }
                    }
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Write `entry` to `repository`.
///
/// Returns the message to print if the write failed and errors are shown on
/// the console.
fn persist(repository: &dyn Repository, entry: Entry, console_level: usize) -> Option<String> {
    match repository.write_entry(entry) {
        Ok(()) => None,
        Err(err) if Level::Error as usize <= console_level => {
            Some(format!("error: failed to persist log entry: {err}"))
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use log::{debug, error, info};
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Memory {
        entries: Mutex<VecDeque<Entry>>,
    }

    impl Repository for Memory {
        fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
            Ok(self
                .entries
                .lock()
                .map_err(|err| Error::Unknown(err.to_string()))?
                .clone())
        }

        fn write_entry(&self, entry: Entry) -> Result<(), Error> {
            self.entries
                .lock()
                .map_err(|err| Error::Unknown(err.to_string()))?
                .push_front(entry);
            Ok(())
        }
    }

    struct Broken;

    impl Repository for Broken {
        fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
            Err(Error::Unknown("broken".to_string()))
        }

        fn write_entry(&self, _: Entry) -> Result<(), Error> {
            Err(Error::Unknown("disk full".to_string()))
        }
    }

    fn entry() -> Entry {
        Entry {
            time: "Mar 01 09:30:00".to_string(),
            level: Level::Info,
            message: "foo".to_string(),
        }
    }

    #[test]
    fn test_persist() {
        let memory = Memory::default();
        assert_eq!(
            persist(&memory, entry(), LevelFilter::Warn as usize),
            None
        );
        assert_eq!(memory.read_entries().unwrap(), VecDeque::from([entry()]));
    }

    #[test]
    fn test_persist_reports_failed_write() {
        assert_eq!(
            persist(&Broken, entry(), LevelFilter::Warn as usize),
            Some("error: failed to persist log entry: disk full".to_string())
        );
        assert_eq!(persist(&Broken, entry(), LevelFilter::Off as usize), None);
    }

    #[test]
    fn test_init() {
        let memory = Arc::new(Mutex::new(Memory::default()));
        init(memory.clone(), LevelFilter::Off).unwrap();

        info!("first");
        debug!("ignored");
        error!("second");

        let entries = memory.lock().unwrap().read_entries().unwrap();
        assert_eq!(
            entries
                .iter()
                .map(|e| (e.level, e.message.as_str()))
                .collect::<Vec<_>>(),
            vec![(Level::Error, "second"), (Level::Info, "first")]
        );

        assert!(init(memory, LevelFilter::Off).is_err());
    }

    #[test]
    fn test_entry_serde() {
        let entry = Entry {
            time: "Mar 01 09:30:00".to_string(),
            level: Level::Warn,
            message: "foo".to_string(),
        };
        let serialized = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            serialized,
            r#"{"time":"Mar 01 09:30:00","level":"Warn","message":"foo"}"#
        );
        assert_eq!(serde_json::from_str::<Entry>(&serialized).unwrap(), entry);
    }
}
