//! The `ComputingConfiguration` facade.
//!
//! This is the entry point for library users. It ties the pieces together:
//!
//! 1. resolve the configuration file ([`ConfigSource`])
//! 2. load it into a [`ConfigStore`]
//! 3. activate the `default` package into an [`ActiveProfile`]
//! 4. render the active package's template with optional override layers
//!
//! ```rust,no_run
//! use divvy_cli::compute::ComputingConfiguration;
//! use divvy_cli::settings::Settings;
//! use std::path::Path;
//!
//! # fn example() -> divvy_cli::core::Result<()> {
//! let mut compute = ComputingConfiguration::builder()
//!     .config_file("~/divvy_config.yaml")
//!     .build()?;
//!
//! compute.activate_package("slurm");
//!
//! let mut job = Settings::new();
//! job.set("jobname", "align");
//! job.set("code", "bowtie2 -x idx -U reads.fq");
//! compute.write_script(Path::new("submission/align.sub"), &[job])?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Each facade owns a `compute` tracing span recording its configuration file.
//! Every operation runs inside that span, so log lines from separate sessions in
//! one process can be told apart.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::Span;

use crate::config::{ConfigSource, ConfigStore, LoadReport};
use crate::constants::DEFAULT_COMPUTE_PACKAGE;
use crate::core::{DivvyError, Result};
use crate::profile::ActiveProfile;
use crate::settings::{MergeStrategy, Settings};
use crate::templating::{RenderOutcome, TemplateRenderer, merge_override_layers};
use crate::utils::expand_path;
use crate::utils::fs::read_text_file;

/// What to do when the default package cannot be activated at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingPackagePolicy {
    /// Log a warning and continue with an empty profile.
    #[default]
    Warn,
    /// Fail construction with [`DivvyError::ActivationFailed`].
    Error,
}

/// Builder for [`ComputingConfiguration`].
#[derive(Debug, Clone)]
pub struct ComputingConfigurationBuilder {
    source: Option<ConfigSource>,
    merge_strategy: MergeStrategy,
    missing_package_policy: MissingPackagePolicy,
    default_package: String,
}

impl Default for ComputingConfigurationBuilder {
    fn default() -> Self {
        Self {
            source: None,
            merge_strategy: MergeStrategy::default(),
            missing_package_policy: MissingPackagePolicy::default(),
            default_package: DEFAULT_COMPUTE_PACKAGE.to_string(),
        }
    }
}

impl ComputingConfigurationBuilder {
    /// Load this file instead of consulting the environment.
    ///
    /// `~` and environment variables in the path are expanded.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.source = Some(ConfigSource::Explicit(expand_path(&path.as_ref().to_string_lossy())));
        self
    }

    /// Use an already resolved configuration source.
    pub fn source(mut self, source: ConfigSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    pub fn missing_package_policy(mut self, policy: MissingPackagePolicy) -> Self {
        self.missing_package_policy = policy;
        self
    }

    /// Package activated at construction. Defaults to `default`.
    pub fn default_package(mut self, name: impl Into<String>) -> Self {
        self.default_package = name.into();
        self
    }

    /// Resolve and load the configuration, then activate the default package.
    ///
    /// Without an explicit source, `$DIVCFG`, then `$PEPENV`, then the bundled
    /// default configuration is used.
    ///
    /// # Errors
    ///
    /// - [`DivvyError::ConfigNotFound`] if the resolved file does not exist
    /// - any error from [`ConfigStore::load`]
    /// - [`DivvyError::ActivationFailed`] if the default package cannot be
    ///   activated and the policy is [`MissingPackagePolicy::Error`]
    pub fn build(self) -> Result<ComputingConfiguration> {
        let source = self.source.unwrap_or_else(|| ConfigSource::resolve(None));
        let config_file = source.locate()?;

        let span = tracing::info_span!("compute", config = %config_file.display());
        let (store, profile) = {
            let _entered = span.enter();
            tracing::debug!("Configuration source: {}", source);

            let mut store = ConfigStore::with_merge_strategy(self.merge_strategy);
            store.load(&config_file)?;

            let mut profile = ActiveProfile::with_merge_strategy(self.merge_strategy);
            if let Err(e) = profile.try_activate(&self.default_package, &store) {
                match self.missing_package_policy {
                    MissingPackagePolicy::Warn => tracing::warn!(
                        "{}; available packages: {}",
                        e,
                        store.names().into_iter().collect::<Vec<_>>().join(", ")
                    ),
                    MissingPackagePolicy::Error => return Err(e),
                }
            }
            (store, profile)
        };

        Ok(ComputingConfiguration {
            store,
            profile,
            renderer: TemplateRenderer::new(),
            source,
            config_file,
            merge_strategy: self.merge_strategy,
            span,
        })
    }
}

/// A divvy session: loaded packages plus the active profile.
#[derive(Debug)]
pub struct ComputingConfiguration {
    store: ConfigStore,
    profile: ActiveProfile,
    renderer: TemplateRenderer,
    source: ConfigSource,
    config_file: PathBuf,
    merge_strategy: MergeStrategy,
    span: Span,
}

impl ComputingConfiguration {
    pub fn builder() -> ComputingConfigurationBuilder {
        ComputingConfigurationBuilder::default()
    }

    /// Session using the configuration found in the environment, or the bundled one.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Session using the configuration file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().config_file(path).build()
    }

    /// Merge package `name` into the active settings.
    ///
    /// Returns `false` and logs a warning if the package is unknown; the active
    /// settings are unchanged in that case.
    pub fn activate_package(&mut self, name: &str) -> bool {
        let _entered = self.span.enter();
        let activated = self.profile.activate(name, &self.store);
        if activated {
            tracing::info!("Activating compute package '{}'", name);
        }
        activated
    }

    /// Like [`activate_package`](Self::activate_package), but returns the error.
    pub fn try_activate_package(&mut self, name: &str) -> Result<()> {
        let _entered = self.span.enter();
        self.profile.try_activate(name, &self.store)
    }

    /// Clear the active settings, then activate `name`.
    pub fn clean_start(&mut self, name: &str) -> bool {
        let _entered = self.span.enter();
        self.profile.clean_start(name, &self.store)
    }

    /// Clear the active settings.
    pub fn reset_active_settings(&mut self) {
        let _entered = self.span.enter();
        tracing::debug!("Resetting active compute settings");
        self.profile.reset();
    }

    /// The live active settings.
    pub fn active_package(&self) -> &Settings {
        self.profile.get()
    }

    /// Mutable access to the active settings.
    pub fn active_package_mut(&mut self) -> &mut Settings {
        self.profile.get_mut()
    }

    /// Packages activated since the last reset, in order.
    pub fn activated_packages(&self) -> &[String] {
        self.profile.activated_packages()
    }

    pub fn list_compute_packages(&self) -> BTreeSet<&str> {
        self.store.names()
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Load another configuration file and merge its packages into the session.
    ///
    /// The active settings are not changed; re-activate to pick up new values.
    pub fn update_packages(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let _entered = self.span.enter();
        let path = expand_path(&path.as_ref().to_string_lossy());
        self.store.load(&path)
    }

    /// Text of the active package's submission template.
    ///
    /// # Errors
    ///
    /// [`DivvyError::MissingTemplate`] if no active package defines
    /// `submission_template`; IO errors reading the template file.
    pub fn template(&self) -> Result<String> {
        let _entered = self.span.enter();
        let path = self.profile.get().submission_template().ok_or_else(|| {
            DivvyError::MissingTemplate {
                package: self.describe_active(),
            }
        })?;
        tracing::debug!("Reading submission template {}", path.display());
        Ok(read_text_file(path)?)
    }

    /// Render the active template without writing it anywhere.
    ///
    /// `layers` are extra variables, highest precedence first; all of them
    /// override the active settings. The active settings themselves are not
    /// modified.
    pub fn render_script(&self, layers: &[Settings]) -> Result<RenderOutcome> {
        let _entered = self.span.enter();
        let template = self.template()?;
        let variables = merge_override_layers(self.profile.get(), layers, self.merge_strategy);
        self.renderer.render(&template, &variables)
    }

    /// Render the active template and write it to `path`.
    ///
    /// Missing parent directories are created. See
    /// [`render_script`](Self::render_script) for how `layers` apply.
    pub fn write_script(&self, path: &Path, layers: &[Settings]) -> Result<RenderOutcome> {
        let _entered = self.span.enter();
        let template = self.template()?;
        let variables = merge_override_layers(self.profile.get(), layers, self.merge_strategy);
        self.renderer.render_to_file(&template, &variables, path)
    }

    /// The configuration file loaded at construction.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    fn describe_active(&self) -> String {
        match self.profile.activated_packages() {
            [] => "none activated".to_string(),
            names => names.join(", "),
        }
    }
}

/// Read a YAML settings file for use as an override layer.
///
/// An empty file, or one holding only `null`, yields empty settings.
///
/// # Errors
///
/// [`DivvyError::SettingsFormatError`] if the file is not YAML or not a mapping
/// of setting name to value; IO errors reading it.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = read_text_file(path)?;
    if content.trim().is_empty() {
        return Ok(Settings::new());
    }

    let settings: Option<Settings> =
        serde_yaml::from_str(&content).map_err(|e| DivvyError::SettingsFormatError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(settings.unwrap_or_default())
}
