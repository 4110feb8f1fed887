//! Shared helpers for the integration tests.
//!
//! The database tests need a PostgreSQL server reachable through
//! `PGKIT_TEST_URL` with a role allowed to create databases. When the
//! variable is unset they print a note and pass.

#![allow(dead_code)]

use std::env;
use std::sync::Once;

use pgkit::Database;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the connection URI of the test server.
pub const TEST_URL_VAR: &str = "PGKIT_TEST_URL";

/// Install a tracing subscriber once per test binary, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The test server URI, or `None` when the database tests should be skipped.
pub fn test_url() -> Option<String> {
    init_tracing();
    match env::var(TEST_URL_VAR) {
        Ok(url) if !url.is_empty() => Some(url),
        _ => {
            eprintln!("{} is not set, skipping database test", TEST_URL_VAR);
            None
        }
    }
}

/// Open a handle to the test server, or `None` when the test should be skipped.
pub fn open_test_database() -> Option<Database> {
    test_url().map(|url| Database::open(&url).expect("failed to open test database"))
}
