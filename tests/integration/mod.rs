//! Integration test suite for the `divvy` binary
//!
//! Each test runs the compiled binary against a configuration in a temporary
//! directory. `DIVCFG`, `PEPENV` and `RUST_LOG` are cleared and `DIVVY_HOME` points
//! into the test's temp dir so the user's environment never leaks in.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **list**: package listing, config discovery, output formats
//! - **write**: script rendering, override precedence, error reporting
//! - **init**: writing the bundled configuration

use assert_cmd::Command;
use std::path::Path;

mod init;
mod list;
mod write;

/// `divvy` command isolated from the caller's environment.
pub fn divvy(scratch: &Path) -> Command {
    let mut cmd = Command::cargo_bin("divvy").unwrap();
    cmd.env_remove("DIVCFG")
        .env_remove("PEPENV")
        .env_remove("RUST_LOG")
        .env("DIVVY_HOME", scratch.join("divvy-home"))
        .current_dir(scratch);
    cmd
}
