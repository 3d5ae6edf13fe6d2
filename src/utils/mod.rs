//! Cross-cutting utilities: file system helpers and user path expansion.

pub mod fs;

use std::path::PathBuf;

/// Expand `~` and `$VAR` / `${VAR}` references in a user-supplied path.
///
/// Unset variables are left as written rather than failing, so a literal `$`
/// in a file name survives.
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = match shellexpand::full(raw) {
        Ok(expanded) => expanded,
        Err(e) => {
            tracing::debug!("Could not expand variables in '{}': {}", raw, e);
            shellexpand::tilde(raw)
        }
    };
    PathBuf::from(expanded.as_ref())
}
