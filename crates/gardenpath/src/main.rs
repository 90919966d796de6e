#![forbid(unsafe_code)]

//! `gardenpath` binary entry point.

use clap::Parser;
use gardenpath::cli::Cli;
use gardenpath::{commands, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbosity.tracing_level_filter(), cli.log_json) {
        eprintln!("gardenpath: {e}");
        return ExitCode::FAILURE;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match commands::run(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("gardenpath: {e}");
            ExitCode::FAILURE
        }
    }
}
