//! divvy - cluster job submission script writer
//!
//! divvy turns a shell command into a job submission script for whichever computing
//! environment you run on: a laptop, a SLURM/SGE/LSF cluster, or a container runtime.
//! Environments are described once, as *compute packages* in a YAML configuration,
//! and each package points at a plain-text template with `{UPPERCASE}` placeholders.
//!
//! # Architecture Overview
//!
//! - A YAML configuration defines named compute packages
//! - The `default` package is activated when a session starts; further packages can
//!   be layered on top
//! - Rendering fills the active package's template with its settings plus per-job
//!   override layers
//!
//! ```yaml
//! compute_packages:
//!   default:
//!     submission_template: templates/localhost_template.sub
//!     submission_command: sh
//!   slurm:
//!     submission_template: templates/slurm_template.sub
//!     submission_command: sbatch
//! ```
//!
//! # Core Modules
//!
//! - [`compute`] - The [`ComputingConfiguration`](compute::ComputingConfiguration) facade
//! - [`config`] - Package catalog, configuration discovery, bundled defaults
//! - [`profile`] - The active profile and package activation
//! - [`templating`] - Placeholder substitution and override layers
//! - [`settings`] - Typed settings mapping and merge strategies
//!
//! ## Supporting Modules
//!
//! - [`cli`] - The `divvy` command-line interface
//! - [`core`] - Error types and user-facing error formatting
//! - [`utils`] - File system helpers and path expansion
//! - [`constants`] - Configuration key and environment variable names
//!
//! # Example
//!
//! ```rust,no_run
//! use divvy_cli::compute::ComputingConfiguration;
//! use divvy_cli::settings::Settings;
//!
//! # fn example() -> divvy_cli::core::Result<()> {
//! let mut compute = ComputingConfiguration::new()?;
//! compute.activate_package("slurm");
//!
//! let job: Settings = [("jobname", "test"), ("code", "echo hello")].into_iter().collect();
//! let outcome = compute.render_script(&[job])?;
//! print!("{}", outcome.content);
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The library logs through `tracing` and never installs a subscriber itself; the
//! `divvy` binary writes logs to stderr.

pub mod cli;
pub mod compute;
pub mod config;
pub mod constants;
pub mod core;
pub mod profile;
pub mod settings;
pub mod templating;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
