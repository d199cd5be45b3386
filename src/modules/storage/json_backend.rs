use crate::core::traits::KeyValueStore;
use crate::utils::APP_NAME;
use anyhow::{Context, Result};
use log::warn;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value store persisted as a single JSON object on disk.
///
/// The whole file is read once on open and rewritten on every change.
pub struct JsonStorageBackend {
    file_path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonStorageBackend {
    pub fn new() -> Result<Self> {
        let mut path = dirs::config_dir().context("Could not find config directory")?;
        path.push(APP_NAME);
        path.push("storage.json");
        Self::with_path(path)
    }

    /// Open a store at an explicit location. A missing file is an empty store;
    /// an unreadable one is logged and replaced on the next write.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let entries = Self::read_entries(&file_path);
        Ok(Self { file_path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_entries(path: &Path) -> Map<String, Value> {
        if !path.exists() {
            return Map::new();
        }

        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str::<Value>(&content).map_err(anyhow::Error::from));

        match parsed {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("Ignoring {}: not a JSON object", path.display());
                Map::new()
            }
            Err(e) => {
                warn!("Ignoring unreadable storage file {}: {}", path.display(), e);
                Map::new()
            }
        }
    }

    fn flush(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for JsonStorageBackend {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
