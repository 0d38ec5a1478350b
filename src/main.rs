//! Guru - package installer
//!
//! Installs self-describing package directories onto the host: copies their
//! file trees into place, installs system dependencies, provisions the
//! accounts they declare and registers their manual pages.

use clap::Parser;
use miette::Diagnostic;

mod accounts;
mod cli;
mod commands;
mod error;
mod hooks;
mod host;
mod installer;
mod logging;
mod operations;
mod package;
#[cfg(test)]
mod test_fixtures;
mod ui;

use cli::{Cli, Commands};
use error::GuruError;

/// Print an error, its causes and its help text to stderr
fn report_error(err: &GuruError) {
    eprintln!(
        "{} {}",
        console::Style::new().bold().red().for_stderr().apply_to("Error:"),
        err
    );

    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }

    if let Some(help) = err.help() {
        eprintln!("  help: {}", help);
    }
}

fn main() {
    let cli = Cli::parse();
    cli.color.apply();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}
