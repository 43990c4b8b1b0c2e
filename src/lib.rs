//! Core implementation of 2lazy
//!
//! 2lazy resolves a short alias into a full command line declared in the nearest
//! `2lazy.yml`, then runs it with the caller's stdio, forwarding any extra
//! arguments and propagating the child's exit code.

use std::path::PathBuf;

use log::{debug, info};
use thiserror::Error;

use crate::config_file::{Config, ConfigError};
use crate::dispatch::DispatchError;
use crate::runner::{ExecutionResult, RunError};

pub mod config_file;
pub mod dispatch;
pub mod logger;
pub mod runner;

/// Every way an invocation can fail
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("Process exited with code {0}")]
    ChildNonZeroExit(i32),
}

impl Error {
    /// Exit code the whole program should terminate with.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ChildNonZeroExit(code) => *code,
            _ => 1,
        }
    }

    /// Exit status for the OS. Codes that don't fit in a byte, or would read
    /// as success, become the generic failure code 1.
    #[must_use]
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.exit_code())
            .ok()
            .filter(|c| *c != 0)
            .unwrap_or(1)
    }

    /// Whether the error has already been reported by the child itself.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Error::ChildNonZeroExit(_))
    }
}

/// Load configuration from a file, or find it from the working directory upwards.
///
/// Returns the effective configuration and the path it was loaded from.
///
/// # Errors
///
/// Returns `ConfigError` if the config file is not found, cannot be read, or cannot be parsed.
pub fn load_config(config_file: Option<&str>) -> Result<(Config, PathBuf), ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.is_file() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            config_path
        }
        None => Config::find_config()?,
    };
    debug!("Loading config file: {}", config_path.display());
    let config = Config::from_file(&config_path)?;
    Ok((config, config_path))
}

/// Resolve `alias` and run it to completion.
///
/// # Errors
///
/// Returns `Error::Dispatch` or `Error::Run` if the command cannot be resolved or
/// started, and `Error::ChildNonZeroExit` if it ran but did not succeed.
pub fn execute(
    config: &Config,
    alias: &str,
    extra_args: &[String],
) -> Result<ExecutionResult, Error> {
    let command = dispatch::resolve(config, alias, extra_args)?;
    if config.start_in_project_dir {
        info!(
            "Command will be executed in project's directory: {}",
            config.project_dir.display()
        );
    }
    let result = runner::run(&command, &config.project_dir, config.start_in_project_dir)?;
    if result.success() {
        Ok(result)
    } else {
        Err(Error::ChildNonZeroExit(result.exit_code))
    }
}
