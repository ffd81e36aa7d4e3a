use std::{collections::BTreeMap, sync::Mutex};

use crate::{Error, KeyValueStore};

/// Keep all values in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self
            .values
            .lock()
            .map_err(|err| Error::Unknown(err.to_string()))?
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.values
            .lock()
            .map_err(|err| Error::Unknown(err.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.values
            .lock()
            .map_err(|err| Error::Unknown(err.to_string()))?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();

        assert_eq!(store.get("workouts").unwrap(), None);

        store.set("workouts", "[]").unwrap();
        assert_eq!(store.get("workouts").unwrap(), Some("[]".to_string()));

        store.remove("workouts").unwrap();
        store.remove("workouts").unwrap();
        assert_eq!(store.get("workouts").unwrap(), None);
    }
}
