//! Log setup for the app bootstrap.
//!
//! Library code only emits `tracing` events; the host app calls
//! [`init_tracing`] once to write them as JSON lines to a daily log file.

use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::NotesResult;

pub const LOG_DIR_NAME: &str = "logs";
pub const LOG_FILE_PREFIX: &str = "daynotes.log";
const DEFAULT_FILTER: &str = "info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Build the event filter: `RUST_LOG` wins, then `level`, then `info`.
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    resolve_filter(env.as_deref(), level)
}

/// First directive that parses wins; unparsable ones are skipped.
fn resolve_filter(env: Option<&str>, level: Option<&str>) -> EnvFilter {
    [env, level]
        .into_iter()
        .flatten()
        .filter(|directive| !directive.trim().is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, logging under `<data_dir>/logs`.
///
/// Only the first call installs anything; later calls return Ok.
pub fn init_tracing(data_dir: &Path, level: Option<&str>) -> NotesResult<()> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = data_dir.join(LOG_DIR_NAME);
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .json()
        .with_writer(non_blocking)
        .try_init();

    match installed {
        Ok(()) => {
            let _ = LOG_GUARD.set(guard);
            tracing::info!(log_dir = %log_dir.display(), "Logging initialized");
        }
        // The host app installed its own subscriber; leave it in charge
        Err(e) => tracing::debug!(error = %e, "Global subscriber already set"),
    }
    Ok(())
}
