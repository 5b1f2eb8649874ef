//! One-shot stamping of a single message file.
//!
//! Every outcome goes to `log.txt`; the exit status is non-zero only when
//! that log itself cannot be written.

mod cli;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use swift_hmac::{commands, Error, Journal, Settings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn settings_for(home: Option<PathBuf>) -> Result<Settings, Error> {
    match home {
        Some(dir) => Ok(Settings::with_base_dir(dir)),
        None => Settings::beside_executable(),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let home = std::env::var_os(cli::HOME_ENV).map(PathBuf::from);
    let result = settings_for(home).and_then(|settings| match cli::Cli::try_parse() {
        Ok(cli) => commands::run(&settings, cli.file()).map(|_| ()),
        Err(err) => {
            let rendered = err.to_string();
            let summary = rendered.lines().next().unwrap_or_default();
            let summary = summary.strip_prefix("error: ").unwrap_or(summary);
            Journal::new(settings.log_path()).append(&format!("invalid arguments: {summary}"))
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}
