//! Core types and error handling for divvy.
//!
//! Everything else in the crate reports failures through [`DivvyError`]; the CLI turns
//! them into an [`ErrorContext`] via [`user_friendly_error`] before printing.

pub mod error;

pub use error::{DivvyError, ErrorContext, user_friendly_error};

/// Result alias for library operations that fail with a [`DivvyError`].
pub type Result<T, E = DivvyError> = std::result::Result<T, E>;
