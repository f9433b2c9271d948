//! Diagnostic logging.  The terminal belongs to the UI, so log messages only
//! ever go to a file.
use anyhow::Context;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither the configuration nor `RUST_LOG` sets one
const DEFAULT_FILTER: &str = "gridsnake=info";

/// Install a global subscriber that appends log messages to the file at
/// `path`.  `level` is an `EnvFilter` directive string; if it is `None`,
/// `RUST_LOG` is consulted instead.
pub(crate) fn init(path: &Path, level: Option<&str>) -> anyhow::Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    let filter = match level {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log level {directives:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(())
}
