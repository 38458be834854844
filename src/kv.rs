// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.kudiflow", "Kudiflow", "kudiflow"));

/// One JSON object on disk, addressed by string keys — the persistence
/// contract of the product (users / activeUser / transactions /
/// recurringTxns / darkMode), kept as-is.
pub struct KvStore {
    path: PathBuf,
    map: Map<String, Value>,
}

pub fn data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("kudiflow.json"))
}

impl KvStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let map = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Read store at {}", path.display()))?;
            match serde_json::from_str::<Map<String, Value>>(&raw) {
                Ok(m) => m,
                Err(err) => {
                    // A wrecked file should not brick the app; start fresh
                    // and leave the evidence in the log.
                    warn!(path = %path.display(), %err, "store file unreadable; starting empty");
                    Map::new()
                }
            }
        } else {
            Map::new()
        };
        Ok(KvStore { path, map })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(data_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.map.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(err) => {
                warn!(key, %err, "stored value unreadable; treated as absent");
                None
            }
        }
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let v = serde_json::to_value(value).with_context(|| format!("Encode key '{key}'"))?;
        self.map.insert(key.to_string(), v);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }

    /// Durably writes the whole object: temp file in the same directory,
    /// then rename, so readers never observe a half-applied mutation.
    pub fn persist(&self) -> Result<()> {
        let encoded = serde_json::to_string_pretty(&self.map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded).with_context(|| format!("Write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Replace store at {}", self.path.display()))?;
        Ok(())
    }
}
