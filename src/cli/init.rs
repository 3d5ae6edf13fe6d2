//! Write the bundled default configuration and templates to disk.
//!
//! The target is the configuration path divvy would otherwise read: `--config`, or
//! `$DIVCFG` / `$PEPENV`. Templates are written to `templates/` beside it.
//!
//! ```bash
//! divvy init -c ~/divvy/divvy_config.yaml
//! export DIVCFG=~/divvy/divvy_config.yaml
//! ```
//!
//! An existing configuration is never replaced unless `--force` is given.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use crate::config::bundled::{self, InstallOutcome};

#[derive(Args)]
pub struct InitCommand {
    /// Overwrite an existing configuration and templates
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let source = config.config_source();
        let path = source.path().ok_or_else(|| {
            anyhow!("No configuration path given. Pass --config <FILE> or set $DIVCFG")
        })?;

        match bundled::install(path, self.force)? {
            InstallOutcome::AlreadyExists(path) => {
                tracing::warn!(
                    "Configuration already exists at {}; use --force to overwrite",
                    path.display()
                );
            }
            InstallOutcome::Created {
                config,
                templates,
            } => {
                println!("{} Wrote divvy configuration to {}", "✓".green(), config.display());
                for template in &templates {
                    tracing::debug!("Wrote template {}", template.display());
                }
                println!("\n{}", "Next steps:".cyan());
                println!("  export DIVCFG={}", config.display());
                println!("  {}", "divvy list".bright_white());
            }
        }
        Ok(())
    }
}
