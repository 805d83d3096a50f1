//! Light/dark preference persisted in the `themeMode` slot.

use std::fmt;

use anyhow::Result;

use crate::storage::{SharedStorage, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemePreference {
    storage: SharedStorage,
}

impl ThemePreference {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Stored mode; anything unreadable counts as light
    pub fn mode(&self) -> ThemeMode {
        match self.storage.get(THEME_KEY) {
            Ok(Some(mode)) if mode == "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn set(&self, mode: ThemeMode) -> Result<()> {
        self.storage.set(THEME_KEY, mode.as_str())
    }

    pub fn toggle(&self) -> Result<ThemeMode> {
        let mode = self.mode().toggled();
        self.set(mode)?;
        Ok(mode)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{LocalStorage, MemoryStorage};

    #[test]
    fn test_defaults_to_light_and_toggles() {
        let storage = Arc::new(MemoryStorage::new());
        let theme = ThemePreference::new(storage.clone());
        assert_eq!(theme.mode(), ThemeMode::Light);

        assert_eq!(theme.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(theme.toggle().unwrap(), ThemeMode::Light);
    }

    #[test]
    fn test_unknown_value_reads_as_light() {
        let storage = Arc::new(MemoryStorage::new().with(THEME_KEY, "solarized"));
        assert_eq!(ThemePreference::new(storage).mode(), ThemeMode::Light);
    }
}
