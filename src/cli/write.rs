//! Render a submission script for one compute package.
//!
//! The `default` package is always active first; `--package` is activated on top of
//! it. Template values come from three places, highest precedence first:
//!
//! 1. trailing `--key value` pairs
//! 2. the YAML file given with `--settings`
//! 3. the active package settings
//!
//! The pairs may follow the options directly. Everything from the first pair on is
//! taken as template values, so a `--` separator is only needed when the first key
//! is also the name of a `write` option.
//!
//! ```bash
//! divvy write -p slurm -o job.sub --jobname align --mem 16000 --code "bowtie2 ..."
//! divvy write -s job.yaml -- --settings extra > job.sub
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::CliConfig;
use crate::compute::load_settings_file;
use crate::constants::DEFAULT_COMPUTE_PACKAGE;
use crate::core::DivvyError;
use crate::settings::Settings;

#[derive(Args)]
pub struct WriteCommand {
    /// Compute package to activate
    #[arg(short, long, default_value = DEFAULT_COMPUTE_PACKAGE)]
    package: String,

    /// YAML file of template values
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Write the script here instead of printing it
    #[arg(short, long, value_name = "FILE")]
    outfile: Option<PathBuf>,

    /// Template values as `--key value` pairs
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "--KEY VALUE"
    )]
    vars: Vec<String>,
}

impl WriteCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let cli_vars = parse_override_pairs(&self.vars)?;
        let mut compute = config.load_compute()?;

        if let Err(e) = compute.store().get(&self.package) {
            tracing::error!(
                "Available compute packages: {}",
                compute.list_compute_packages().into_iter().collect::<Vec<_>>().join(", ")
            );
            return Err(e.into());
        }
        if self.package != DEFAULT_COMPUTE_PACKAGE {
            compute.try_activate_package(&self.package)?;
        }

        let mut layers = vec![cli_vars];
        if let Some(path) = &self.settings {
            tracing::info!("Loading settings file: {}", path.display());
            let file_vars = load_settings_file(path)
                .with_context(|| format!("Failed to load settings file {}", path.display()))?;
            layers.push(file_vars);
        }

        match &self.outfile {
            Some(path) => {
                compute.write_script(path, &layers)?;
            }
            None => {
                let outcome = compute.render_script(&layers)?;
                print!("{}", outcome.content);
            }
        }
        Ok(())
    }
}

/// Turn `["--key", "value", ...]` into settings.
///
/// Leading dashes are stripped from keys; values are kept as strings.
///
/// # Errors
///
/// [`DivvyError::InvalidOverride`] if a key does not start with `-` or has no value.
pub fn parse_override_pairs(args: &[String]) -> Result<Settings, DivvyError> {
    let mut settings = Settings::new();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        let key = flag.trim_start_matches('-');
        if key == flag.as_str() || key.is_empty() {
            return Err(DivvyError::InvalidOverride {
                reason: format!("expected a --key, found '{flag}'"),
            });
        }
        let Some(value) = iter.next() else {
            return Err(DivvyError::InvalidOverride {
                reason: format!("missing value for '{flag}'"),
            });
        };
        settings.set(key, value.as_str());
    }

    Ok(settings)
}
