//! File system helpers for reading configuration and templates and writing
//! rendered scripts.
//!
//! All helpers return [`std::io::Error`], keeping the [`std::io::ErrorKind`] of the
//! underlying failure and adding the offending path to the message.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// Succeeds silently if the directory is already present.
///
/// # Errors
///
/// - The path exists but is not a directory (`AlreadyExists`)
/// - Directory creation fails (permissions, read-only file system, ...)
///
/// # Examples
///
/// ```rust,no_run
/// use divvy_cli::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> std::io::Result<()> {
/// ensure_dir(Path::new("jobs/submission/scripts"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| with_path(e, "Failed to create directory", path))?;
    } else if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", path.display()),
        ));
    }
    Ok(())
}

/// Ensures that the parent directory of a file path exists.
///
/// Paths without a parent, or with an empty one (a bare file name), need nothing.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Reads a text file.
pub fn read_text_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).map_err(|e| with_path(e, "Failed to read", path))
}

/// Writes a text file, creating missing parent directories first.
///
/// The write is not atomic; an interrupted write can leave a partial file.
pub fn write_text_file(path: &Path, content: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|e| with_path(e, "Failed to write", path))
}

/// Absolute form of `path`, resolved against the current directory if relative.
///
/// Does not touch the file system and does not resolve symlinks or `..`.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

fn with_path(error: io::Error, action: &str, path: &Path) -> io::Error {
    io::Error::new(error.kind(), format!("{action} {}: {error}", path.display()))
}
