//! Configuration - snapshot destination.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment key overriding the snapshot path.
pub const DATA_FILE_ENV: &str = "LDMS_JOBINFO_DATA_FILE";

/// Built-in snapshot path when no override is set.
pub const DEFAULT_DATA_FILE: &str = "/var/run/ldms_jobinfo.data";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    EmptyPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfoConfig {
    pub data_file: PathBuf,
}

impl Default for JobInfoConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl JobInfoConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Read the override from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the config through an arbitrary key lookup.
    ///
    /// An empty override is ignored with a warning and the default is used.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match Self::try_from_lookup(lookup) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, default = DEFAULT_DATA_FILE, "ignoring data file override");
                Self::default()
            }
        }
    }

    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(DATA_FILE_ENV) {
            None => Ok(Self::default()),
            Some(path) if path.trim().is_empty() => {
                Err(ConfigError::EmptyPath(DATA_FILE_ENV.to_string()))
            }
            Some(path) => Ok(Self::new(path)),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}
