//! Temporary divvy configurations for tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::compute::ComputingConfiguration;

/// Configuration used by [`ConfigFixture::new`].
///
/// Template paths are relative so tests exercise load-time normalization.
pub const STANDARD_CONFIG: &str = r#"
compute_packages:
  default:
    submission_template: templates/local.sub
    submission_command: sh
  slurm:
    submission_template: templates/slurm.sub
    submission_command: sbatch
    partition: standard
    mem: 4000
  singularity:
    singularity_args: "--bind /data"
"#;

/// Template for the `default` package.
pub const LOCAL_TEMPLATE: &str = "#!/bin/bash\n\n{CODE} | tee {LOGFILE}\n";

/// Template for the `slurm` package.
pub const SLURM_TEMPLATE: &str = "#!/bin/bash\n#SBATCH --job-name='{JOBNAME}'\n#SBATCH --mem='{MEM}'\n#SBATCH --partition={PARTITION}\n\n{CODE}\n";

/// A configuration file and its templates in a temporary directory.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct ConfigFixture {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl ConfigFixture {
    /// Fixture with [`STANDARD_CONFIG`] and its two templates.
    pub fn new() -> Result<Self> {
        let fixture = Self::with_config(STANDARD_CONFIG)?;
        fixture.write_file("templates/local.sub", LOCAL_TEMPLATE)?;
        fixture.write_file("templates/slurm.sub", SLURM_TEMPLATE)?;
        Ok(fixture)
    }

    /// Fixture with the given configuration content and no templates.
    pub fn with_config(content: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("divvy_config.yaml");
        fs::write(&config_path, content.trim_start())?;
        Ok(Self {
            temp_dir,
            config_path,
        })
    }

    /// Root of the fixture directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `relative` inside the fixture, creating directories.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Open a session on the fixture's configuration file.
    pub fn compute(&self) -> Result<ComputingConfiguration> {
        Ok(ComputingConfiguration::from_file(&self.config_path)?)
    }
}
