//! JSON file backed plugin store.
//!
//! The whole file is one JSON object keyed by namespace. Writes replace the
//! file atomically (temp file + rename) so a crash never leaves a torn file.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::kernel::BasePluginStore;

pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a JSON object", self.path.display()))
    }

    async fn write_all(&self, all: &Map<String, Value>) -> Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let body = serde_json::to_vec_pretty(all)?;
        tokio::fs::write(&tmp, body)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

#[async_trait]
impl BasePluginStore for JsonFileStore {
    async fn get_data(&self, namespace: &str) -> Result<Map<String, Value>> {
        let mut all = self.read_all().await?;
        match all.remove(namespace) {
            Some(Value::Object(data)) => Ok(data),
            Some(other) => anyhow::bail!(
                "Namespace {} in {} holds {} instead of an object",
                namespace,
                self.path.display(),
                other
            ),
            None => Ok(Map::new()),
        }
    }

    async fn save_data(&self, namespace: &str, data: Map<String, Value>) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        all.insert(namespace.to_string(), Value::Object(data));
        self.write_all(&all).await?;

        tracing::debug!(path = %self.path.display(), namespace, "Saved plugin data");
        Ok(())
    }
}
