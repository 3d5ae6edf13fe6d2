//! Command-line interface for divvy.
//!
//! # Available Commands
//!
//! - `list` - Show the compute packages defined in the configuration
//! - `write` - Render a submission script for a compute package
//! - `init` - Write the default configuration and templates to disk
//!
//! # Global Options
//!
//! - `--config <FILE>` / `-c` - Configuration file (otherwise `$DIVCFG`, then
//!   `$PEPENV`, then the bundled default)
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//!
//! # Output
//!
//! Program results (package listings, rendered scripts without `--outfile`) go to
//! stdout. Logging goes to stderr, so `divvy write ... > job.sub` captures only the
//! script. `RUST_LOG` overrides the level chosen by `--verbose` / `--quiet`.
//!
//! # Examples
//!
//! ```bash
//! divvy list
//! divvy -c ~/divvy_config.yaml write -p slurm -o job.sub --jobname test --code "run.sh"
//! divvy init -c ~/divvy_config.yaml
//! ```

mod init;
mod list;
mod write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::compute::ComputingConfiguration;
use crate::config::ConfigSource;

pub use write::parse_override_pairs;

/// Runtime settings derived from the global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Configuration file given with `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            config_path: None,
        }
    }

    /// Install the stderr logging subscriber.
    ///
    /// Does nothing if a global subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = match std::env::var("RUST_LOG") {
            Ok(value) if !value.is_empty() => EnvFilter::new(value),
            _ => EnvFilter::new(&self.log_level),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .try_init();
    }

    /// Where the configuration comes from for this invocation.
    pub fn config_source(&self) -> ConfigSource {
        ConfigSource::resolve(self.config_path.as_deref())
    }

    /// Open a divvy session on the configured source.
    pub fn load_compute(&self) -> Result<ComputingConfiguration> {
        Ok(ComputingConfiguration::builder().source(self.config_source()).build()?)
    }
}

/// Top-level command-line parser.
#[derive(Parser)]
#[command(
    name = "divvy",
    about = "Write cluster job submission scripts from templates",
    version,
    author,
    long_about = "divvy renders job submission scripts for local, SLURM, SGE, LSF and container \
                  environments from compute packages defined in a YAML configuration."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the divvy configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available compute packages
    List(list::ListCommand),

    /// Write a job submission script
    Write(write::WriteCommand),

    /// Initialize a divvy configuration with the default templates
    Init(init::InitCommand),
}

impl Cli {
    /// Set up logging and run the selected command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config)
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Run the selected command without touching global logging state.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::List(cmd) => cmd.execute(&config),
            Commands::Write(cmd) => cmd.execute(&config),
            Commands::Init(cmd) => cmd.execute(&config),
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}
