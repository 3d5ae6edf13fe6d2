//! Compute package catalog.
//!
//! [`ConfigStore`] owns every compute package known to a divvy session. Packages are
//! loaded from one or more YAML files; each load is merged into the catalog rather
//! than replacing it:
//!
//! - a package name seen for the first time is inserted as-is
//! - a package name already present has its settings extended field by field,
//!   with values from the newer file winning (see [`MergeStrategy`])
//! - packages are never removed
//!
//! # Template paths
//!
//! Right after a file is parsed, every relative `submission_template` is rewritten
//! against the directory of *that* file. Later merges therefore cannot reinterpret
//! an earlier package's template relative to a different file, and every template
//! path in the store is absolute.
//!
//! ```rust,no_run
//! use divvy_cli::config::ConfigStore;
//! use std::path::Path;
//!
//! # fn example() -> divvy_cli::core::Result<()> {
//! let mut store = ConfigStore::new();
//! store.load(Path::new("cluster/divvy_config.yaml"))?;
//! store.load(Path::new("site-overrides/extra.yaml"))?;
//!
//! for name in store.names() {
//!     println!("{name}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod bundled;
pub mod parser;
pub mod source;

pub use parser::{ParsedConfig, parse_config};
pub use source::ConfigSource;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use strsim::levenshtein;

use crate::constants::{
    COMPUTE_PACKAGES_KEY, SIMILARITY_THRESHOLD_PERCENT, SUBMISSION_TEMPLATE_KEY,
};
use crate::core::{DivvyError, Result};
use crate::settings::{MergeStrategy, Settings};
use crate::utils::expand_path;
use crate::utils::fs::{absolute_path, read_text_file};

/// Outcome of loading one configuration file into a [`ConfigStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Absolute path of the file that was loaded.
    pub path: PathBuf,
    /// Packages defined by that file, in name order.
    pub packages: Vec<String>,
    /// Set when the file used the deprecated `compute` section name.
    pub deprecated_key: Option<&'static str>,
}

/// Catalog of compute packages keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    packages: BTreeMap<String, Settings>,
    merge_strategy: MergeStrategy,
    sources: Vec<PathBuf>,
}

impl ConfigStore {
    /// Create an empty store using shallow merges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that merges package settings with `strategy`.
    #[must_use]
    pub fn with_merge_strategy(strategy: MergeStrategy) -> Self {
        Self {
            merge_strategy: strategy,
            ..Self::default()
        }
    }

    /// Create a store holding the packages of one configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    /// Load a configuration file and merge its packages into the store.
    ///
    /// Relative template paths are resolved against the directory of `path`,
    /// which is itself made absolute first. A file using the legacy `compute`
    /// section is accepted; the report's `deprecated_key` tells the caller.
    ///
    /// # Errors
    ///
    /// - [`DivvyError::IoError`] if the file cannot be read
    /// - [`DivvyError::ConfigParseError`] / [`DivvyError::ConfigFormatError`] if it
    ///   is not a valid configuration; the store is left untouched
    pub fn load(&mut self, path: &Path) -> Result<LoadReport> {
        let path = absolute_path(path)?;
        tracing::info!("Loading divvy config file: {}", path.display());

        let content = read_text_file(&path)?;
        let mut parsed = parse_config(&content, &path)?;

        if let Some(key) = parsed.deprecated_key {
            tracing::warn!(
                "Divvy compute configuration '{}' section changed to '{}' ({})",
                key,
                COMPUTE_PACKAGES_KEY,
                path.display()
            );
        }

        normalize_template_paths(&mut parsed.packages, &path);
        let packages: Vec<String> = parsed.packages.keys().cloned().collect();

        self.merge(parsed.packages);
        self.sources.push(path.clone());

        tracing::debug!(
            "Available divvy packages: {}",
            self.packages.keys().cloned().collect::<Vec<_>>().join(", ")
        );

        Ok(LoadReport {
            path,
            packages,
            deprecated_key: parsed.deprecated_key,
        })
    }

    /// Merge already-normalized packages into the store.
    ///
    /// New names are inserted verbatim; existing names are extended field by field
    /// with the store's merge strategy.
    pub fn merge(&mut self, packages: BTreeMap<String, Settings>) {
        for (name, settings) in packages {
            match self.packages.get_mut(&name) {
                Some(existing) => {
                    tracing::debug!("Updating compute package '{}'", name);
                    existing.merge(&settings, self.merge_strategy);
                }
                None => {
                    tracing::debug!("Adding compute package '{}'", name);
                    self.packages.insert(name, settings);
                }
            }
        }
    }

    /// Names of all known packages.
    pub fn names(&self) -> BTreeSet<&str> {
        self.packages.keys().map(String::as_str).collect()
    }

    /// Settings of the package called `name`.
    ///
    /// # Errors
    ///
    /// [`DivvyError::UnknownPackage`], carrying the closest known name when one is
    /// similar enough to be a likely typo.
    pub fn get(&self, name: &str) -> Result<&Settings> {
        self.packages.get(name).ok_or_else(|| DivvyError::UnknownPackage {
            name: name.to_string(),
            suggestion: self.closest_name(name),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Files loaded into this store, in load order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn merge_strategy(&self) -> MergeStrategy {
        self.merge_strategy
    }

    fn closest_name(&self, target: &str) -> Option<String> {
        let max_distance = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
        self.packages
            .keys()
            .map(|name| (name, levenshtein(target, name)))
            .filter(|(_, distance)| *distance <= max_distance)
            .min_by_key(|(_, distance)| *distance)
            .map(|(name, _)| name.clone())
    }
}

/// Rewrite relative `submission_template` paths against the directory of
/// `config_file`.
///
/// `~` and environment variables in the template path are expanded first. Absolute
/// paths are kept. Packages without a template are left alone.
pub fn normalize_template_paths(packages: &mut BTreeMap<String, Settings>, config_file: &Path) {
    let base = config_file.parent().unwrap_or_else(|| Path::new(""));

    for (name, settings) in packages.iter_mut() {
        let Some(raw) = settings.get_str(SUBMISSION_TEMPLATE_KEY).map(str::to_owned) else {
            continue;
        };

        let expanded = expand_path(&raw);
        let resolved = if expanded.is_relative() {
            base.join(&expanded)
        } else {
            expanded
        };

        if resolved.as_os_str() != raw.as_str() {
            tracing::debug!(
                "Package '{}': submission template '{}' -> '{}'",
                name,
                raw,
                resolved.display()
            );
            settings.set_submission_template(resolved);
        }
    }
}
