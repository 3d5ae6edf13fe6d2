//! Test utilities for divvy
//!
//! Helpers shared by unit tests and the `tests/` suites: one-time logging setup and
//! [`ConfigFixture`], a temporary directory holding a configuration file and its
//! templates.
//!
//! # Example
//!
//! ```rust,no_run
//! use divvy_cli::test_utils::ConfigFixture;
//!
//! let fixture = ConfigFixture::new().unwrap();
//! let mut compute = fixture.compute().unwrap();
//! assert!(compute.activate_package("slurm"));
//! ```

pub mod fixtures;

pub use fixtures::ConfigFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set, that level is used;
/// otherwise `RUST_LOG` is honored, and without either no subscriber is installed.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
