// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Read from YAML or JSON depending on the file extension. Every field is
//! optional in the file and falls back to its default.

use crate::error::{ConfigError, StorageError};
use crate::hotspots::DEFAULT_STORAGE_KEY;
use crate::io::FileStorage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "HOTSPOTS_CONFIG";

/// Config file looked up in the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "hotspots.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage slot holding the serialized hotspots
    pub storage_key: String,
    /// Directory for file storage (platform data directory when unset)
    pub storage_dir: Option<PathBuf>,
    /// Load the stored hotspots at startup
    pub restore_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
            restore_on_start: true,
        }
    }
}

impl Config {
    /// Load a config file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => {
                let yaml = std::fs::read_to_string(path)?;
                Ok(serde_yaml::from_str(&yaml)?)
            }
            Some("json") => {
                let json = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&json)?)
            }
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load from an explicit path if given, else from
    /// [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            return Self::load(fallback);
        }
        Ok(Self::default())
    }

    /// File storage rooted at `storage_dir`, or the platform default.
    pub fn file_storage(&self) -> Result<FileStorage, StorageError> {
        match &self.storage_dir {
            Some(dir) => Ok(FileStorage::with_root(dir.clone())),
            None => FileStorage::from_default_dir(),
        }
    }
}
