use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};

use super::LocalStorage;

/// Storage file name in the data directory
const STORAGE_FILE: &str = "storage.json";

/// JSON-file backed storage. Every write rewrites the whole file.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(STORAGE_FILE),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .context("Failed to read storage file")?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).context("Failed to parse storage file")
    }

    fn write_all(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(slots)?;
        std::fs::write(&self.path, contents).context("Failed to write storage file")?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        let mut slots = self.read_all()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_all(&slots)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        let mut slots = self.read_all()?;
        if slots.remove(key).is_some() {
            self.write_all(&slots)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("token", "abc.def.ghi").unwrap();
        storage.set("themeMode", "dark").unwrap();

        let reopened = FileStorage::new(dir.path());
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc.def.ghi"));
        assert_eq!(reopened.get("themeMode").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_remove_keeps_other_slots() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("token", "abc").unwrap();
        storage.set("themeMode", "light").unwrap();

        storage.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
        assert_eq!(storage.get("themeMode").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(&dir.path().join("nested"));
        assert_eq!(storage.get("token").unwrap(), None);
        storage.remove("token").unwrap();
        assert!(!storage.path().exists());
    }
}
