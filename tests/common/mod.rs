//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::PathBuf;
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times, subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// A small Rust source file annotated with both comment styles.
///
/// Annotations sit on lines 1, 4, 6, 9 and 13.
#[allow(dead_code)]
pub const SAMPLE_SOURCE: &str = r#"fn main() {
    // #-- Startup :: parse args
    let args = std::env::args();

    // #-- Startup :: load config
    let config = load(args);
    /* #-- main loop */
    loop {
        if config.done() {
            // #-- Shutdown :: Drain :: flush queues
            break;
        }
    }
    // #-- Startup :: parse args
}
"#;

/// Write `content` to `<temp_dir>/<name>` and return the path.
#[allow(dead_code)]
pub fn write_source(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}
