//! The active profile: settings currently selected for rendering.
//!
//! A profile starts empty. Activating a package merges that package's settings on
//! top of whatever is already active, so several packages can be layered:
//!
//! ```rust,no_run
//! # use divvy_cli::config::ConfigStore;
//! # use divvy_cli::profile::ActiveProfile;
//! # fn example(store: &ConfigStore) {
//! let mut profile = ActiveProfile::new();
//! profile.activate("slurm", store);
//! profile.activate("singularity", store); // adds container settings to slurm
//! profile.clean_start("local", store); // only "local" remains
//! # }
//! ```
//!
//! Activation of an unknown package is a soft failure: the profile is left exactly
//! as it was and [`ActiveProfile::activate`] returns `false`.

use crate::config::ConfigStore;
use crate::core::{DivvyError, Result};
use crate::settings::{MergeStrategy, Settings};

/// Mutable working copy of the settings selected by activation.
#[derive(Debug, Clone, Default)]
pub struct ActiveProfile {
    settings: Settings,
    activated: Vec<String>,
    merge_strategy: MergeStrategy,
}

impl ActiveProfile {
    /// Create an empty profile using shallow merges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_merge_strategy(merge_strategy: MergeStrategy) -> Self {
        Self {
            merge_strategy,
            ..Self::default()
        }
    }

    /// Merge the settings of package `name` into the profile.
    ///
    /// # Errors
    ///
    /// [`DivvyError::ActivationFailed`] if the store is empty or has no such
    /// package. The profile is not modified in that case.
    pub fn try_activate(&mut self, name: &str, store: &ConfigStore) -> Result<()> {
        if store.is_empty() {
            tracing::debug!("No compute packages loaded; cannot activate '{}'", name);
            return Err(DivvyError::ActivationFailed {
                package: name.to_string(),
            });
        }

        let package = store.get(name).map_err(|e| {
            tracing::debug!("{}", e);
            DivvyError::ActivationFailed {
                package: name.to_string(),
            }
        })?;

        tracing::debug!("Activating compute package '{}'", name);
        self.settings.merge(package, self.merge_strategy);
        self.activated.push(name.to_string());
        Ok(())
    }

    /// Merge the settings of package `name` into the profile, reporting failure
    /// as `false` and a warning instead of an error.
    pub fn activate(&mut self, name: &str, store: &ConfigStore) -> bool {
        match self.try_activate(name, store) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        }
    }

    /// Discard all active settings. Calling it on an empty profile is a no-op.
    pub fn reset(&mut self) {
        self.settings = Settings::new();
        self.activated.clear();
    }

    /// Reset, then activate `name`, so only that package's settings remain.
    pub fn clean_start(&mut self, name: &str, store: &ConfigStore) -> bool {
        self.reset();
        self.activate(name, store)
    }

    /// The live settings.
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Packages merged into the profile since the last reset, in activation order.
    pub fn activated_packages(&self) -> &[String] {
        &self.activated
    }

    /// The most recently activated package.
    pub fn current_package(&self) -> Option<&str> {
        self.activated.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}
