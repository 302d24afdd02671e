//! helmpack CLI - install Helm, merge values files and package a chart

use clap::Parser;
use std::process::ExitCode;

mod config;
mod display;
mod error;
mod exit_codes;
mod helm;
mod logging;
mod pipeline;

use config::{Cli, Settings};
use error::CliError;

fn main() -> ExitCode {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    logging::init(cli.debug);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return report(CliError::internal(e)),
    };

    let result = Settings::from_cli(cli).and_then(|settings| runtime.block_on(pipeline::run(&settings)));

    match result {
        Ok(path) => {
            tracing::info!("{}={}", pipeline::OUTPUT_NAME, path.display());
            ExitCode::from(exit_codes::SUCCESS)
        }
        Err(err) => report(err),
    }
}

fn report(err: CliError) -> ExitCode {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    ExitCode::from(code)
}
