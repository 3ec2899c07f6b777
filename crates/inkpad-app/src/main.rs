//! Main application entry point.

use clap::Parser;
use inkpad_app::cli::{self, CliArgs, CliError};
use inkpad_app::NotebookConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();

    match try_main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: CliArgs) -> Result<(), CliError> {
    let config = NotebookConfig::from_env()?;
    cli::run(args, config, &mut std::io::stdout().lock())
}
