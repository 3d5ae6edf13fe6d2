//! Parsing of divvy configuration documents.
//!
//! A configuration document is YAML with one recognized top-level key,
//! `compute_packages`, mapping package names to settings mappings:
//!
//! ```yaml
//! compute_packages:
//!   default:
//!     submission_template: templates/localhost_template.sub
//!     submission_command: sh
//!   slurm:
//!     submission_template: templates/slurm_template.sub
//!     submission_command: sbatch
//! ```
//!
//! The historical key `compute` is accepted as an alias. When it is used the parse
//! result records it in [`ParsedConfig::deprecated_key`] so the caller can warn. If
//! both keys are present, `compute_packages` wins and the legacy section is ignored.
//!
//! Parsing does not touch template paths; see [`super::normalize_template_paths`].

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::{COMPUTE_PACKAGES_KEY, LEGACY_COMPUTE_KEY, SUBMISSION_TEMPLATE_KEY};
use crate::core::{DivvyError, Result};
use crate::settings::Settings;

/// Packages read from one configuration document.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfig {
    /// Package name to settings, in name order.
    pub packages: BTreeMap<String, Settings>,
    /// The legacy key, if the document contains it.
    pub deprecated_key: Option<&'static str>,
}

/// Parse a configuration document read from `file`.
///
/// `file` is only used in error messages.
///
/// # Errors
///
/// - [`DivvyError::ConfigParseError`] if `content` is not valid YAML
/// - [`DivvyError::ConfigFormatError`] if the package section is missing, is not a
///   mapping, or any package is not a settings mapping with a string
///   `submission_template`
pub fn parse_config(content: &str, file: &Path) -> Result<ParsedConfig> {
    let document: Value = if content.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(content).map_err(|e| DivvyError::ConfigParseError {
            file: file.display().to_string(),
            reason: e.to_string(),
        })?
    };

    let root = match document {
        Value::Mapping(root) => root,
        Value::Null => Mapping::new(),
        _ => return Err(format_error(file, "the top-level document must be a mapping")),
    };

    let current = root.get(COMPUTE_PACKAGES_KEY);
    let legacy = root.get(LEGACY_COMPUTE_KEY);

    let (section, deprecated_key) = match (current, legacy) {
        (Some(section), legacy) => {
            if legacy.is_some() {
                tracing::debug!(
                    "Both '{}' and '{}' present in {}; ignoring '{}'",
                    COMPUTE_PACKAGES_KEY,
                    LEGACY_COMPUTE_KEY,
                    file.display(),
                    LEGACY_COMPUTE_KEY
                );
            }
            (section, legacy.map(|_| LEGACY_COMPUTE_KEY))
        }
        (None, Some(section)) => (section, Some(LEGACY_COMPUTE_KEY)),
        (None, None) => {
            return Err(format_error(
                file,
                &format!("missing top-level '{COMPUTE_PACKAGES_KEY}' section"),
            ));
        }
    };

    let Value::Mapping(section) = section else {
        return Err(format_error(
            file,
            &format!("'{COMPUTE_PACKAGES_KEY}' must be a mapping of package name to settings"),
        ));
    };

    let mut packages = BTreeMap::new();
    for (name, value) in section {
        let name = package_name(name).ok_or_else(|| {
            format_error(file, &format!("package names must be scalars, found {name:?}"))
        })?;

        let Value::Mapping(mapping) = value else {
            return Err(format_error(file, &format!("package '{name}' must be a mapping of settings")));
        };

        let settings = Settings::from_mapping(mapping).map_err(|key| {
            format_error(file, &format!("package '{name}' has a non-scalar setting key {key}"))
        })?;

        if let Some(template) = settings.get(SUBMISSION_TEMPLATE_KEY) {
            if !template.is_string() {
                return Err(format_error(
                    file,
                    &format!("package '{name}': '{SUBMISSION_TEMPLATE_KEY}' must be a string path"),
                ));
            }
        }

        packages.insert(name, settings);
    }

    Ok(ParsedConfig {
        packages,
        deprecated_key,
    })
}

fn package_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn format_error(file: &Path, reason: &str) -> DivvyError {
    DivvyError::ConfigFormatError {
        file: file.display().to_string(),
        reason: reason.to_string(),
    }
}
