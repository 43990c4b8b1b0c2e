use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use too_lazy::logger::{self, Verbosity};
use too_lazy::{execute, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "2lazy",
    version,
    about = "when you're too lazy to type full command"
)]
struct Cli {
    /// Show debug messages
    #[arg(long)]
    debug: bool,

    /// Hide info messages
    #[arg(long)]
    quiet: bool,

    /// Path to config file (searched upwards from the current directory if not specified)
    #[arg(short, long)]
    config: Option<String>,

    /// Alias to run, followed by extra arguments appended to its command
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ALIAS [ARGS]"
    )]
    command: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(Verbosity::from_flags(cli.quiet, cli.debug));

    let Some((alias, args)) = cli.command.split_first() else {
        let _ = Cli::command().print_help();
        return ExitCode::from(1);
    };

    match run(alias, args, cli.config.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_silent() {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_status())
        }
    }
}

fn run(alias: &str, args: &[String], config_file: Option<&str>) -> Result<(), too_lazy::Error> {
    let (config, _) = load_config(config_file)?;
    if config.quiet {
        logger::set_verbosity(Verbosity::Quiet);
    }
    execute(&config, alias, args)?;
    Ok(())
}
