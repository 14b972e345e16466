//! `fitlog` - CLI for logging workouts
//!
//! Starts an interactive session over the configured activity file.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use clap::Parser;
use tracing::debug;

use fitlog::cli::Cli;
use fitlog::{init_logging, Config, Session, Store};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // --file wins over the config file and environment
    let config = Config::load_from(cli.config.clone())?.with_data_file(cli.file.clone());
    config.validate()?;
    debug!("Using activity file {}", config.data_file().display());

    let (store, outcome) = Store::open(config.data_file());

    let mut session = Session::new(store, io::stdin().lock(), io::stdout().lock());
    session.report_load(&outcome)?;
    session.run()?;

    Ok(())
}
