//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Request handling never reads process-wide environment variables.

use crate::constants::DEFAULT_DATA_DIR;
use crate::{RecordError, RecordResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which document store backend to run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local store; contents vanish on restart.
    #[default]
    Memory,
    /// One JSON document per file under the data directory.
    File,
}

impl FromStr for StoreBackend {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "file" | "fs" => Ok(StoreBackend::File),
            other => Err(RecordError::InvalidInput(format!(
                "unknown store backend '{}' (expected 'memory' or 'file')",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => f.write_str("memory"),
            StoreBackend::File => f.write_str("file"),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store_backend: StoreBackend,
    data_dir: PathBuf,
}

impl CoreConfig {
    pub fn new(store_backend: StoreBackend, data_dir: PathBuf) -> RecordResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(RecordError::InvalidInput("data_dir cannot be empty".into()));
        }

        Ok(Self {
            store_backend,
            data_dir,
        })
    }

    /// An in-memory configuration, used by tests and local experiments.
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.data_dir.join(collection)
    }
}

/// Parse the store backend from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`StoreBackend::Memory`].
pub fn store_backend_from_env_value(value: Option<String>) -> RecordResult<StoreBackend> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<StoreBackend>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

/// Resolve the data directory from an optional string value, falling back to
/// [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
