//! Configuration file handling for 2lazy

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// Name of the per-project configuration file
pub const CONFIG_FILENAME: &str = "2lazy.yml";

/// Errors that can occur while locating or loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to find {file} file in {0} or any of its parents", file = CONFIG_FILENAME)]
    ConfigNotFound(PathBuf),
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to read config file {path}: {source}")]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
}

/// Raw contents of a `2lazy.yml` file, before normalization
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub quiet: Option<bool>,
    pub start_in_project_dir: Option<bool>,
    pub project_dir: Option<PathBuf>,
    pub commands: Option<BTreeMap<String, String>>,
}

/// Effective configuration for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub quiet: bool,
    pub start_in_project_dir: bool,
    pub project_dir: PathBuf,
    pub commands: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Normalize against the directory holding the config file.
    ///
    /// A missing `project_dir` becomes `config_dir`, a relative one is joined onto it.
    #[must_use]
    pub fn into_config(self, config_dir: &Path) -> Config {
        let project_dir = match self.project_dir {
            Some(dir) if dir.as_os_str().is_empty() => config_dir.to_path_buf(),
            Some(dir) if dir.is_relative() => config_dir.join(dir),
            Some(dir) => dir,
            None => config_dir.to_path_buf(),
        };
        Config {
            quiet: self.quiet.unwrap_or_default(),
            start_in_project_dir: self.start_in_project_dir.unwrap_or_default(),
            project_dir,
            commands: self.commands.unwrap_or_default(),
        }
    }
}

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, or
    /// `ConfigError::Yaml` if its contents don't match the expected schema.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file).map_err(|e| ConfigError::Read {
            source: e,
            path: file.to_path_buf(),
        })?;
        let raw: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
            source: e,
            path: file.to_path_buf(),
        })?;
        let config_dir = match file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        Ok(raw.into_config(config_dir))
    }

    /// Names of every configured alias.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Searches for a configuration file in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be determined,
    /// or `ConfigError::ConfigNotFound` if no config file is found.
    pub fn find_config() -> Result<PathBuf, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        Self::find_config_from(&cwd)
    }

    /// Searches for a configuration file in `start` and its parents, up to and
    /// including the filesystem root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if no directory on the way up holds one.
    pub fn find_config_from(start: &Path) -> Result<PathBuf, ConfigError> {
        let mut path = start.to_path_buf();
        debug!("Searching for config file in {}", start.display());
        loop {
            let candidate = path.join(CONFIG_FILENAME);
            debug!("Testing path {}", candidate.display());
            if candidate.is_file() {
                debug!("Found config file: {}", candidate.display());
                return Ok(candidate);
            }
            // pop() fails at the root
            if !path.pop() {
                return Err(ConfigError::ConfigNotFound(start.to_path_buf()));
            }
        }
    }
}
