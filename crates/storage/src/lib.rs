#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod file;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;

/// Synchronous string store addressed by a fixed set of keys.
pub trait KeyValueStore {
    /// Return the value of `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    /// Replace the value of `key` as a whole.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    /// Remove `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Unknown(String),
}
