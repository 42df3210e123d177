//! Devshelf CLI Binary
//!
//! Command-line interface for the developer resource shelf.

use anyhow::Context;
use clap::Parser;
use devshelf::logging::init_logging;
use devshelf::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.load_config().context("Error loading configuration")?;
    init_logging(Some(&config.logging)).context("Error initializing logging")?;

    let context = CliContext::new(config).context("Error opening shelf")?;
    let output = context.execute(&cli.command)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
