// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Library error types.

use thiserror::Error;

/// Failure reading or writing the durable hotspot slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unable to resolve a data directory for storage")]
    NoDataDirectory,
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("storage quota exceeded writing {key:?}: {size} bytes, limit {limit}")]
    QuotaExceeded { key: String, size: usize, limit: usize },
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failure loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}
