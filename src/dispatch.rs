//! Alias resolution: turns an alias plus trailing arguments into an argv

use log::debug;
use thiserror::Error;

use crate::config_file::Config;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unknown alias {alias}. Available aliases: {}", format_aliases(.available))]
    UnknownAlias {
        alias: String,
        available: Vec<String>,
    },
    #[error("Unable to split command for alias {alias}: {source}")]
    Split {
        alias: String,
        source: shell_words::ParseError,
    },
    #[error("Alias {0} has an empty command")]
    EmptyCommand(String),
}

fn format_aliases(available: &[String]) -> String {
    if available.is_empty() {
        "none configured".to_string()
    } else {
        available.join(", ")
    }
}

/// Executable and argument list ready to be spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub executable: String,
    pub arguments: Vec<String>,
}

impl ResolvedCommand {
    /// Split a raw command line and append `extra_args` after its own tokens.
    ///
    /// Returns `Ok(None)` if the command line holds no tokens at all.
    ///
    /// # Errors
    ///
    /// Returns the splitter's error if the command line has unbalanced quoting.
    pub fn parse(
        command: &str,
        extra_args: &[String],
    ) -> Result<Option<Self>, shell_words::ParseError> {
        let tokens = shell_words::split(command)?;
        let Some((executable, rest)) = tokens.split_first() else {
            return Ok(None);
        };
        let mut arguments = Vec::with_capacity(rest.len() + extra_args.len());
        arguments.extend_from_slice(rest);
        arguments.extend_from_slice(extra_args);
        Ok(Some(Self {
            executable: executable.clone(),
            arguments,
        }))
    }
}

/// Resolve `alias` against the configured commands.
///
/// # Errors
///
/// Returns `DispatchError::UnknownAlias` listing every configured alias on a miss,
/// `DispatchError::Split` if the command has malformed quoting, or
/// `DispatchError::EmptyCommand` if it contains nothing to run.
pub fn resolve(
    config: &Config,
    alias: &str,
    extra_args: &[String],
) -> Result<ResolvedCommand, DispatchError> {
    let Some(command) = config.commands.get(alias) else {
        return Err(DispatchError::UnknownAlias {
            alias: alias.to_string(),
            available: config.aliases().map(str::to_string).collect(),
        });
    };
    debug!("Alias {alias} resolves to `{command}`");

    ResolvedCommand::parse(command, extra_args)
        .map_err(|e| DispatchError::Split {
            alias: alias.to_string(),
            source: e,
        })?
        .ok_or_else(|| DispatchError::EmptyCommand(alias.to_string()))
}
