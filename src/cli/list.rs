//! List the compute packages defined in the configuration.
//!
//! ```bash
//! divvy list
//! divvy list --format json
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::CliConfig;

/// Output format for `divvy list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A heading followed by one package name per line
    #[default]
    Text,
    /// A JSON array of package names
    Json,
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl ListCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let compute = config.load_compute()?;
        let names: Vec<&str> = compute.list_compute_packages().into_iter().collect();
        println!("{}", format_listing(&names, self.format)?);
        Ok(())
    }
}

/// Render package names, already sorted, for display.
pub fn format_listing(names: &[&str], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::from("Available compute packages:");
            for name in names {
                output.push('\n');
                output.push_str(name);
            }
            Ok(output)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(names)?),
    }
}
