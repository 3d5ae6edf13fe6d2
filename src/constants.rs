//! Global constants used throughout the divvy codebase.
//!
//! Key names that appear in configuration files, environment variables
//! consulted during config discovery, and the name of the package that is
//! activated when a configuration is first loaded.

/// Top-level key holding the compute package definitions.
pub const COMPUTE_PACKAGES_KEY: &str = "compute_packages";

/// Deprecated spelling of [`COMPUTE_PACKAGES_KEY`].
///
/// Still accepted when loading, with a deprecation warning.
pub const LEGACY_COMPUTE_KEY: &str = "compute";

/// Package setting holding the path to the submission script template.
pub const SUBMISSION_TEMPLATE_KEY: &str = "submission_template";

/// Package activated automatically when a configuration is loaded.
pub const DEFAULT_COMPUTE_PACKAGE: &str = "default";

/// Environment variables that may name the configuration file, in lookup order.
///
/// `PEPENV` is the historical name and is only consulted when `DIVCFG` is unset.
pub const CONFIG_ENV_VARS: &[&str] = &["DIVCFG", "PEPENV"];

/// Environment variable overriding where the bundled default configuration
/// is materialized on disk.
pub const DIVVY_HOME_ENV: &str = "DIVVY_HOME";

/// File name of the bundled default configuration.
pub const DEFAULT_CONFIG_FILENAME: &str = "divvy_config.yaml";

/// Maximum Levenshtein distance, as a percentage of the requested name's length,
/// for a known package to be offered as a suggestion.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
