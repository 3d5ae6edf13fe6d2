//! Discovery of the configuration file to load.
//!
//! # Precedence Order
//! 1. An explicit path (`--config` or the builder's `config_file`)
//! 2. The first set environment variable of `DIVCFG`, `PEPENV`
//! 3. The bundled default configuration
//!
//! Explicit and environment paths are expanded (`~`, `$VAR`) before use.

use std::fmt;
use std::path::{Path, PathBuf};

use super::bundled;
use crate::constants::CONFIG_ENV_VARS;
use crate::core::{DivvyError, Result};
use crate::utils::expand_path;

/// Where a session's configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given directly by the caller.
    Explicit(PathBuf),
    /// Path named by an environment variable.
    Environment {
        /// Variable that supplied the path
        var: String,
        /// Expanded path
        path: PathBuf,
    },
    /// The configuration shipped with divvy.
    Bundled,
}

impl ConfigSource {
    /// Resolve the source using the process environment.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::resolve_with_env(explicit, &|key| std::env::var(key).ok())
    }

    /// Resolve the source with an injected environment lookup.
    pub fn resolve_with_env(
        explicit: Option<&Path>,
        env_lookup: &impl Fn(&str) -> Option<String>,
    ) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(expand_path(&path.to_string_lossy()));
        }

        for &var in CONFIG_ENV_VARS {
            match env_lookup(var) {
                Some(value) if !value.trim().is_empty() => {
                    return Self::Environment {
                        var: var.to_string(),
                        path: expand_path(value.trim()),
                    };
                }
                _ => {}
            }
        }

        Self::Bundled
    }

    /// The configured path, if this is not the bundled default.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path)
            | Self::Environment {
                path, ..
            } => Some(path),
            Self::Bundled => None,
        }
    }

    /// Path of the configuration file to load.
    ///
    /// For the bundled default this writes the default configuration and templates
    /// to disk on first use.
    ///
    /// # Errors
    ///
    /// [`DivvyError::ConfigNotFound`] if an explicit or environment path does not
    /// exist; IO errors from materializing the bundled default.
    pub fn locate(&self) -> Result<PathBuf> {
        match self.path() {
            Some(path) if path.is_file() => Ok(path.to_path_buf()),
            Some(path) => Err(DivvyError::ConfigNotFound {
                path: path.display().to_string(),
            }),
            None => bundled::materialize_default(),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "{}", path.display()),
            Self::Environment {
                var,
                path,
            } => write!(f, "{} (from ${var})", path.display()),
            Self::Bundled => write!(f, "bundled default configuration"),
        }
    }
}
