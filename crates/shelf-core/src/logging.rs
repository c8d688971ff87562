//! Tracing setup.
//!
//! The TUI owns the terminal, so logs go to a file. The filter comes from
//! `SHELF_LOG` (same syntax as `RUST_LOG`), defaulting to `info`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SHELF_LOG";

const DEFAULT_FILTER: &str = "info";

/// Installs a file-backed tracing subscriber.
///
/// Keep the returned guard alive for the lifetime of the process; dropping
/// it flushes and stops the writer thread.
///
/// # Errors
/// Returns an error if the log directory cannot be created, `SHELF_LOG`
/// holds an invalid filter, or a global subscriber is already installed.
pub fn init_file_logging(path: &Path) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log dir {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref())?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn build_filter(directives: Option<&str>) -> Result<EnvFilter> {
    let directives = directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directives).with_context(|| format!("Invalid {LOG_ENV} filter: {directives}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_when_unset_or_blank() {
        assert!(build_filter(None).is_ok());
        assert!(build_filter(Some("  ")).is_ok());
    }

    #[test]
    fn test_filter_accepts_directives() {
        assert!(build_filter(Some("shelf_core=debug,shelf_tui=trace")).is_ok());
    }

    #[test]
    fn test_filter_rejects_bad_level() {
        let err = build_filter(Some("shelf_core=loud")).unwrap_err();
        assert!(err.to_string().contains(LOG_ENV));
    }
}
