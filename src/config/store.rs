use anyhow::Result;
use std::path::PathBuf;

use super::loader::{load_config, save_config};
use super::schema::CometConfig;

/// Persisted local state, injected into the application.
pub trait LocalStore: Send + Sync {
    fn load(&self) -> Result<CometConfig>;
    fn save(&self, config: &CometConfig) -> Result<()>;
    /// Where the state lives, for messages.
    fn location(&self) -> String;
}

/// TOML file on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LocalStore for FileStore {
    fn load(&self) -> Result<CometConfig> {
        load_config(&self.path)
    }

    fn save(&self, config: &CometConfig) -> Result<()> {
        save_config(&self.path, config)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
pub use memory::MemoryStore;
