//! File-backed access to the model configuration.
//!
//! Every call goes to disk; nothing is cached between calls. Advisory locks
//! keep a single read from seeing a half-written file, but a read followed by
//! a write is not protected as a unit.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::{DEFAULT_CONFIG_PATH, ModelConfig, Result, StoreError};

/// Reads and rewrites the model configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store for the file at `path`. The file is not touched.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and parse the configuration file with a shared lock held.
    pub fn read(&self) -> Result<ModelConfig> {
        let mut file = fs::File::open(&self.path).map_err(|e| self.io_error(e))?;

        file.lock_shared().map_err(|e| self.io_error(e))?;
        let mut content = String::new();
        let read = file.read_to_string(&mut content);
        file.unlock().map_err(|e| self.io_error(e))?;
        read.map_err(|e| self.io_error(e))?;

        let config: ModelConfig =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "Loaded config from {:?} ({} models, current {:?})",
            self.path,
            config.available_models.len(),
            config.current_model
        );
        Ok(config)
    }

    /// Overwrite the configuration file with `config`.
    ///
    /// The file is truncated and rewritten in place as compact JSON under an
    /// exclusive lock. A crash part way through leaves a truncated file behind.
    pub fn write(&self, config: &ModelConfig) -> Result<()> {
        let json = serde_json::to_string(config).map_err(StoreError::Serialize)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        file.lock_exclusive().map_err(|e| self.io_error(e))?;
        let result = file
            .set_len(0)
            .and_then(|()| file.write_all(json.as_bytes()))
            .and_then(|()| file.flush());
        file.unlock().map_err(|e| self.io_error(e))?;
        result.map_err(|e| self.io_error(e))?;

        debug!(
            "Saved config to {:?} (current {:?})",
            self.path, config.current_model
        );
        Ok(())
    }

    /// Read just the name of the active model.
    pub fn current_model(&self) -> Result<String> {
        Ok(self.read()?.current_model)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}
