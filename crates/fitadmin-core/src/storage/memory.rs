use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};

use super::LocalStorage;

/// In-process storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot, e.g. a credential left behind by a previous run
    pub fn with(self, key: &str, value: &str) -> Self {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        slots.remove(key);
        Ok(())
    }
}
