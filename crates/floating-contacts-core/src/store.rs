//! Settings storage.
//!
//! The widget reads one raw settings snapshot per render and the admin save
//! flow writes normalized settings back. `SettingsStore` is that seam;
//! `JsonFileStore` keeps the record in a JSON file and `MemoryStore` keeps it
//! in memory for tests and embedding.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::Result;
use crate::settings::ContactSettings;

pub trait SettingsStore {
    /// Return the persisted raw settings, or an empty object if none exist.
    fn get(&self) -> Result<Value>;

    /// Persist already-normalized settings.
    fn save(&mut self, settings: &ContactSettings) -> Result<()>;
}

fn empty_mapping() -> Value {
    Value::Object(Map::new())
}

/// Settings kept as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self) -> Result<Value> {
        if !self.path.exists() {
            tracing::debug!(
                "Settings file {:?} not found, using empty settings",
                self.path
            );
            return Ok(empty_mapping());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(empty_mapping());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&mut self, settings: &ContactSettings) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json + "\n")?;
        tracing::info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<Value>,
}

impl MemoryStore {
    /// Start with a raw snapshot, as if it had been persisted earlier.
    pub fn with_raw(raw: Value) -> Self {
        Self { raw: Some(raw) }
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self) -> Result<Value> {
        Ok(self.raw.clone().unwrap_or_else(empty_mapping))
    }

    fn save(&mut self, settings: &ContactSettings) -> Result<()> {
        self.raw = Some(serde_json::to_value(settings)?);
        Ok(())
    }
}
