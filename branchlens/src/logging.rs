//! File-backed `tracing` setup.
//!
//! The UI owns the terminal, so log output goes to a plain file with ANSI
//! colours disabled. `RUST_LOG` overrides the configured filter.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Builds an `EnvFilter`, preferring `RUST_LOG` when it is set and valid.
pub fn build_env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `path` (appending).
///
/// # Errors
///
/// Returns `Err` if the log directory or file cannot be created.
pub fn init(path: &Path, filter: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // A second init (tests, embedding) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}
