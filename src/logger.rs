use std::io::{IsTerminal, Write};

use anstyle::{AnsiColor, Reset, Style};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// How chatty the tool is on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only
    Quiet,
    #[default]
    Normal,
    Debug,
}

impl Verbosity {
    /// Pick a verbosity from the command line flags; `quiet` wins over `debug`.
    #[must_use]
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    #[must_use]
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Warn,
            Verbosity::Normal => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
        }
    }
}

struct StderrLogger {
    color: bool,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = record.level();
        let mut stderr = std::io::stderr().lock();
        let _ = if self.color {
            let style = level_style(level);
            writeln!(stderr, "{style}{level:<5}{Reset} {}", record.args())
        } else {
            writeln!(stderr, "{level:<5} {}", record.args())
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[must_use]
fn level_style(level: Level) -> Style {
    let color = match level {
        Level::Error => AnsiColor::Red,
        Level::Warn => AnsiColor::Yellow,
        Level::Info => AnsiColor::Blue,
        Level::Debug | Level::Trace => AnsiColor::BrightBlack,
    };
    Style::new().fg_color(Some(anstyle::Color::Ansi(color)))
}

/// Install the stderr logger. Must be called once, before any component runs.
///
/// Calling it again only updates the verbosity.
pub fn init(verbosity: Verbosity) {
    let logger = StderrLogger {
        color: std::io::stderr().is_terminal(),
    };
    // Already installed: keep the existing logger.
    let _ = log::set_boxed_logger(Box::new(logger));
    set_verbosity(verbosity);
}

/// Change the verbosity of the installed logger.
pub fn set_verbosity(verbosity: Verbosity) {
    log::set_max_level(verbosity.level_filter());
}
