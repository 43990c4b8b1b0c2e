//! Child process execution for resolved aliases

use std::path::Path;
use std::process::{Command as ProcessCommand, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use log::{debug, info};
use thiserror::Error;

use crate::dispatch::ResolvedCommand;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Unable to start {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },
}

/// Outcome of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub elapsed: Duration,
}

impl ExecutionResult {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let tenths = d.subsec_millis() / 100;
    if total_secs < 60 {
        format!("{total_secs}.{tenths}s")
    } else {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{mins}m {secs}.{tenths}s")
    }
}

/// Exit code of a finished process, with signal deaths mapped the way shells do.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Spawn `command` with inherited stdio and wait for it to finish.
///
/// When `start_in_project_dir` is set the child starts in `project_dir`,
/// otherwise it inherits our working directory.
///
/// # Errors
///
/// Returns `RunError::Launch` if the process could not be started.
pub fn run(
    command: &ResolvedCommand,
    project_dir: &Path,
    start_in_project_dir: bool,
) -> Result<ExecutionResult, RunError> {
    let mut process = ProcessCommand::new(&command.executable);
    process
        .args(&command.arguments)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if start_in_project_dir {
        process.current_dir(project_dir);
    }
    debug!(
        "Spawning {} with arguments {:?}",
        command.executable, command.arguments
    );

    let start = Instant::now();
    let status = process.status().map_err(|e| RunError::Launch {
        program: command.executable.clone(),
        source: e,
    })?;
    let result = ExecutionResult {
        exit_code: exit_code(status),
        elapsed: start.elapsed(),
    };

    if result.success() {
        info!("Finished in {}", format_duration(result.elapsed));
    } else {
        info!(
            "Process exited with code {} after {}",
            result.exit_code,
            format_duration(result.elapsed)
        );
    }
    Ok(result)
}
