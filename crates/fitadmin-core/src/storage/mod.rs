//! Client-local persisted string slots.
//!
//! The admin console persists exactly two values between runs: the current
//! credential (`token`) and the UI theme preference (`themeMode`). Both go
//! through the `LocalStorage` trait so the session store does not care
//! whether they live in a JSON file, the OS keychain, or memory.

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use anyhow::Result;

pub use self::file::FileStorage;
pub use self::keychain::KeyringStorage;
pub use self::memory::MemoryStorage;

/// Slot holding the current credential
pub const TOKEN_KEY: &str = "token";

/// Slot holding the UI theme preference
pub const THEME_KEY: &str = "themeMode";

pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub type SharedStorage = Arc<dyn LocalStorage>;
