//! Command-line entry point for `langcheck`.

use std::io;

use clap::Parser;
use eyre::Result;
use tracing::error;

use langcheck_cli::cli::{Cli, run};
use langcheck_cli::config::CliConfig;
use langcheck_cli::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    run(&cli, &config, &mut io::stdout().lock())
}
