//! Tracing subscriber setup
//!
//! Shared tracing configuration for the debug binaries and tests.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Logs go to `log_file_path` when given, otherwise to stderr. Filtering
/// follows `RUST_LOG`, defaulting to INFO.
pub fn init_global(log_file_path: Option<&Path>) -> std::io::Result<()> {
    match log_file_path {
        Some(path) => {
            let log_file = File::create(path)?;
            build_subscriber(log_file).init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(env_filter())
                .init();
        }
    }
    Ok(())
}

/// Build a subscriber writing to the given file.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
