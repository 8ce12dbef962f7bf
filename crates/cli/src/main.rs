//! Command line converter from geoscience formats to VTK
#![doc = include_str!("../readme.md")]

mod cli;
mod error;
mod run;

// crate modules
use crate::cli::Cli;
use crate::error::Result;

// external crates
use clap::Parser;
use log::error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run::convert(cli.command, &cli.output) {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Warnings by default, more with each -v
fn init_logging(cli: &Cli) -> Result<()> {
    stderrlog::new()
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 1)
        .show_level(true)
        .timestamp(stderrlog::Timestamp::Off)
        .init()?;
    Ok(())
}
