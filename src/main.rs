use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use make_summary::{Console, Level, MakeSumError, Options, RunContext};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let options = Options::parse();

    match execute(options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let code = match err.downcast_ref::<MakeSumError>() {
                Some(MakeSumError::Exit { code }) => *code,
                Some(other) => {
                    report(&err);
                    other.exit_code()
                }
                None => {
                    report(&err);
                    1
                }
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn execute(options: Options) -> Result<bool> {
    let workdir = std::env::current_dir().context("Failed to resolve the working directory")?;
    let command_name = command_name();

    log::debug!("Running {command_name} in {}", workdir.display());

    let mut context = RunContext::new(&workdir.to_string_lossy(), options, command_name)?;
    Ok(context.run()?)
}

/// Name the binary was invoked as, for the usage banner
fn command_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg| {
            Path::new(&arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_BIN_NAME").to_string())
}

/// Render a failure the same way the console renders error messages
fn report(err: &anyhow::Error) {
    let mut console = Console::stdio();
    console.set_no_terminate(true);
    if console
        .write_error("%s", &[&format!("{err:#}")], Level::Error)
        .is_err()
    {
        eprintln!("Error: {err:#}");
    }
}
