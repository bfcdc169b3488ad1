use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use toml;

#[derive(Debug, Serialize, Deserialize, Default)]
struct StorageData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// String key/value file persisted as TOML.
///
/// Backs both the profile's client state and the credential file. Values are
/// kept in memory until `save` is called.
pub struct LocalStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl LocalStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: HashMap::new(),
        }
    }

    /// Create and load in one step
    pub fn open(path: PathBuf) -> Result<Self> {
        let mut storage = Self::new(path);
        storage.load()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let data: StorageData = toml::from_str(&content)?;
            self.entries = data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = StorageData {
            data: self.entries.clone(),
        };
        let content = toml::to_string_pretty(&data)?;

        // Write to a temp file, then rename so a crash never leaves half a file
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
