//! Error handling for divvy
//!
//! This module provides the error types and user-friendly error reporting used across
//! divvy. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in library code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DivvyError`] - Enumerated error types for every failure mode in divvy
//! - [`ErrorContext`] - Wrapper that adds user-facing details and suggestions
//!
//! # Error Categories
//!
//! - **Configuration**: [`DivvyError::ConfigParseError`], [`DivvyError::ConfigFormatError`],
//!   [`DivvyError::ConfigNotFound`]
//! - **Packages**: [`DivvyError::UnknownPackage`], [`DivvyError::ActivationFailed`],
//!   [`DivvyError::MissingTemplate`]
//! - **Overrides**: [`DivvyError::SettingsFormatError`], [`DivvyError::InvalidOverride`]
//! - **Platform**: [`DivvyError::IoError`]
//!
//! Activation failures are deliberately soft in the normal workflow: probing for an
//! optional package returns `false` instead of an error. [`DivvyError::ActivationFailed`]
//! only surfaces when the caller opts into a strict policy.
//!
//! # Examples
//!
//! ```rust,no_run
//! use divvy_cli::core::{DivvyError, ErrorContext, user_friendly_error};
//!
//! let error = DivvyError::UnknownPackage {
//!     name: "slrum".to_string(),
//!     suggestion: Some("slurm".to_string()),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with "did you mean" suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for divvy operations.
#[derive(Error, Debug)]
pub enum DivvyError {
    /// The configuration file is not valid YAML.
    #[error("Invalid YAML syntax in configuration file {file}")]
    ConfigParseError {
        /// Path to the file that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// The configuration file parsed but lacks the expected structure.
    ///
    /// Raised when neither `compute_packages` nor the legacy `compute` key is present,
    /// or when that key does not hold a mapping of package name to settings mapping.
    #[error("Invalid configuration format in {file}: {reason}")]
    ConfigFormatError {
        /// Path to the offending configuration file
        file: String,
        /// What was wrong with the structure
        reason: String,
    },

    /// Configuration file not found.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was expected to hold a configuration
        path: String,
    },

    /// A compute package was looked up by name but is not defined.
    #[error("Compute package '{name}' not found")]
    UnknownPackage {
        /// Requested package name
        name: String,
        /// Closest known package name, if one is similar enough
        suggestion: Option<String>,
    },

    /// A package could not be activated and the caller asked for a hard failure.
    #[error("Failed to activate compute package '{package}'")]
    ActivationFailed {
        /// Package that could not be activated
        package: String,
    },

    /// The active settings have no `submission_template` to render.
    #[error("No submission template defined for the active compute package ({package})")]
    MissingTemplate {
        /// Names of the activated packages, comma separated
        package: String,
    },

    /// A settings-override file is not a mapping of key to value.
    #[error("Invalid settings file {file}: {reason}")]
    SettingsFormatError {
        /// Path to the settings file
        file: String,
        /// What was wrong with it
        reason: String,
    },

    /// Command-line override pairs could not be interpreted.
    #[error("Invalid template override: {reason}")]
    InvalidOverride {
        /// What was wrong with the override
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for DivvyError {
    fn clone(&self) -> Self {
        match self {
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigFormatError {
                file,
                reason,
            } => Self::ConfigFormatError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigNotFound {
                path,
            } => Self::ConfigNotFound {
                path: path.clone(),
            },
            Self::UnknownPackage {
                name,
                suggestion,
            } => Self::UnknownPackage {
                name: name.clone(),
                suggestion: suggestion.clone(),
            },
            Self::ActivationFailed {
                package,
            } => Self::ActivationFailed {
                package: package.clone(),
            },
            Self::MissingTemplate {
                package,
            } => Self::MissingTemplate {
                package: package.clone(),
            },
            Self::SettingsFormatError {
                file,
                reason,
            } => Self::SettingsFormatError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::InvalidOverride {
                reason,
            } => Self::InvalidOverride {
                reason: reason.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// ```rust,no_run
/// use divvy_cli::core::{DivvyError, ErrorContext};
///
/// let context = ErrorContext::new(DivvyError::ConfigNotFound { path: "x.yaml".into() })
///     .with_suggestion("Run 'divvy init' to create a configuration")
///     .with_details("divvy looks for --config, then $DIVCFG");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying divvy error
    pub error: DivvyError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DivvyError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// Recognizes [`DivvyError`] anywhere in the `anyhow` chain, then bare
/// [`std::io::Error`] kinds, and falls back to a generic message that includes the
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(divvy_error) = error.chain().find_map(|e| e.downcast_ref::<DivvyError>()) {
        return create_error_context(divvy_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DivvyError::Other {
                    message: format_chain(&error),
                })
                .with_suggestion("Check file ownership and permissions on the configuration, template and output paths")
                .with_details("divvy did not have permission to read or write a file");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DivvyError::Other {
                    message: format_chain(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    ErrorContext::new(DivvyError::Other {
        message: format_chain(&error),
    })
}

/// Render an error and its causes as one message.
fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }
    message
}

fn create_error_context(error: DivvyError) -> ErrorContext {
    let (suggestion, details): (Option<String>, Option<String>) = match &error {
        DivvyError::ConfigParseError { file, reason } => (
            Some(format!(
                "Check the YAML syntax in {file}. Common issues: tabs used for indentation, unbalanced quotes"
            )),
            Some(format!("YAML parser reported: {reason}")),
        ),

        DivvyError::ConfigFormatError { .. } => (
            Some("Define your packages under a top-level 'compute_packages' mapping, e.g.\n  compute_packages:\n    default:\n      submission_template: templates/localhost_template.sub".to_string()),
            Some("Every package must be a mapping of settings; 'submission_template' is resolved relative to the file".to_string()),
        ),

        DivvyError::ConfigNotFound { .. } => (
            Some("Pass --config <FILE>, set $DIVCFG, or run 'divvy init' to create a configuration".to_string()),
            Some("divvy resolves its configuration from --config, then $DIVCFG / $PEPENV, then the bundled default".to_string()),
        ),

        DivvyError::UnknownPackage { suggestion, .. } => {
            let hint = match suggestion {
                Some(name) => {
                    format!("Did you mean '{name}'? Run 'divvy list' to see available packages")
                }
                None => "Run 'divvy list' to see available packages".to_string(),
            };
            (Some(hint), None)
        }

        DivvyError::ActivationFailed { .. } => (
            Some("Run 'divvy list' to see available packages, or add the package to your configuration".to_string()),
            Some("Activation fails when the package is not defined or no packages were loaded".to_string()),
        ),

        DivvyError::MissingTemplate { .. } => {
            (Some("Add a 'submission_template' setting to the compute package".to_string()), None)
        }

        DivvyError::SettingsFormatError { .. } => {
            (Some("The settings file must be a YAML mapping of key: value pairs".to_string()), None)
        }

        DivvyError::InvalidOverride { .. } => (
            Some("Pass template values as pairs: --key value (e.g. --jobname test --mem 4000)".to_string()),
            None,
        ),

        _ => (None, None),
    };

    let mut context = ErrorContext::new(error);
    context.suggestion = suggestion;
    context.details = details;
    context
}
