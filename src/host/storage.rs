//! Config storage implementations.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::ConfigStorage;

/// In-memory storage for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryConfigStorage {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryConfigStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStorage for MemoryConfigStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON document on disk; each `set` rewrites the whole file.
///
/// A missing file reads as an empty document, so first use needs no
/// install step.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_document(&self) -> Result<serde_json::Map<String, Value>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(serde_json::Map::new());
            }
            Err(e) => return Err(e).context("failed to read config file"),
        };
        serde_json::from_slice(&raw).context("config file is not valid JSON")
    }
}

#[async_trait]
impl ConfigStorage for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value);
        let raw = serde_json::to_vec_pretty(&Value::Object(document))
            .context("failed to serialize config")?;
        tokio::fs::write(&self.path, raw)
            .await
            .context("failed to write config file")
    }
}
