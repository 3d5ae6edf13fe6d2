//! Default configuration and submission templates shipped inside the binary.
//!
//! The files under `default_config/` are compiled in. They are written to disk in
//! two situations:
//!
//! - [`materialize_default`]: no configuration was named, so the defaults are
//!   unpacked once into `$DIVVY_HOME` (or `<cache dir>/divvy/<version>`) and loaded
//!   from there. Existing files are left alone.
//! - [`install`]: `divvy init` copies the defaults next to a user-chosen
//!   configuration path so they can be edited.

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_CONFIG_FILENAME, DIVVY_HOME_ENV};
use crate::core::{DivvyError, Result};
use crate::utils::expand_path;
use crate::utils::fs::write_text_file;

/// A file shipped with divvy.
#[derive(Debug, Clone, Copy)]
pub struct BundledFile {
    /// Path relative to the configuration file's directory.
    pub relative_path: &'static str,
    pub contents: &'static str,
}

/// The default configuration file.
pub const DEFAULT_CONFIG: BundledFile = BundledFile {
    relative_path: DEFAULT_CONFIG_FILENAME,
    contents: include_str!("../../default_config/divvy_config.yaml"),
};

/// Submission templates referenced by [`DEFAULT_CONFIG`].
pub const TEMPLATES: &[BundledFile] = &[
    BundledFile {
        relative_path: "templates/localhost_template.sub",
        contents: include_str!("../../default_config/templates/localhost_template.sub"),
    },
    BundledFile {
        relative_path: "templates/slurm_template.sub",
        contents: include_str!("../../default_config/templates/slurm_template.sub"),
    },
    BundledFile {
        relative_path: "templates/sge_template.sub",
        contents: include_str!("../../default_config/templates/sge_template.sub"),
    },
    BundledFile {
        relative_path: "templates/lsf_template.sub",
        contents: include_str!("../../default_config/templates/lsf_template.sub"),
    },
    BundledFile {
        relative_path: "templates/localhost_singularity_template.sub",
        contents: include_str!("../../default_config/templates/localhost_singularity_template.sub"),
    },
    BundledFile {
        relative_path: "templates/slurm_singularity_template.sub",
        contents: include_str!("../../default_config/templates/slurm_singularity_template.sub"),
    },
    BundledFile {
        relative_path: "templates/localhost_docker_template.sub",
        contents: include_str!("../../default_config/templates/localhost_docker_template.sub"),
    },
];

/// Result of [`install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The configuration and the listed templates were written.
    Created {
        config: PathBuf,
        templates: Vec<PathBuf>,
    },
    /// A configuration already exists at the path; nothing was written.
    AlreadyExists(PathBuf),
}

/// Directory the bundled defaults are unpacked into.
///
/// `$DIVVY_HOME` if set, otherwise a per-version directory under the user cache dir.
pub fn default_home() -> Option<PathBuf> {
    match std::env::var(DIVVY_HOME_ENV) {
        Ok(home) if !home.trim().is_empty() => Some(expand_path(home.trim())),
        _ => dirs::cache_dir().map(|cache| cache.join("divvy").join(env!("CARGO_PKG_VERSION"))),
    }
}

/// Unpack the bundled defaults into [`default_home`] and return the config path.
pub fn materialize_default() -> Result<PathBuf> {
    let home = default_home().ok_or_else(|| DivvyError::Other {
        message: format!(
            "Cannot determine a directory for the bundled configuration; set ${DIVVY_HOME_ENV}"
        ),
    })?;
    materialize_into(&home)
}

/// Unpack the bundled defaults into `dir`, keeping files that already exist.
pub fn materialize_into(dir: &Path) -> Result<PathBuf> {
    for file in std::iter::once(&DEFAULT_CONFIG).chain(TEMPLATES) {
        let target = dir.join(file.relative_path);
        if !target.exists() {
            tracing::debug!("Writing bundled file {}", target.display());
            write_text_file(&target, file.contents)?;
        }
    }
    Ok(dir.join(DEFAULT_CONFIG.relative_path))
}

/// Write the default configuration to `config_path` and its templates beside it.
///
/// The configuration keeps the caller's file name; templates go to
/// `templates/` next to it. An existing configuration is only replaced when
/// `force` is set. Existing templates are likewise kept unless `force` is set.
pub fn install(config_path: &Path, force: bool) -> Result<InstallOutcome> {
    if config_path.exists() && !force {
        return Ok(InstallOutcome::AlreadyExists(config_path.to_path_buf()));
    }

    let dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    let mut templates = Vec::new();
    for file in TEMPLATES {
        let target = dir.join(file.relative_path);
        if force || !target.exists() {
            write_text_file(&target, file.contents)?;
            templates.push(target);
        }
    }
    write_text_file(config_path, DEFAULT_CONFIG.contents)?;

    Ok(InstallOutcome::Created {
        config: config_path.to_path_buf(),
        templates,
    })
}
