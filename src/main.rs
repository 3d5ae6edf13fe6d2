//! divvy CLI entry point
//!
//! Parses the command line, runs the command, and turns failures into a
//! user-friendly message on stderr with exit code 1.
//!
//! - `list` - List available compute packages
//! - `write` - Write a job submission script
//! - `init` - Write the default configuration and templates

use anyhow::Result;
use clap::Parser;
use divvy_cli::cli;
use divvy_cli::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
