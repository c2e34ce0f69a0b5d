//! Structured logging for the Terra sandbox.
//!
//! Console output with uptime timestamps and module paths, plus an optional
//! JSON log file in debug builds. `RUST_LOG` takes precedence over the
//! level stored in `config.ron`.

use std::fs::File;
use std::path::Path;

use terra_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
/// Blocked-movement traces from the collision layer are noisy, so that
/// crate is held at `warn`.
const DEFAULT_FILTER: &str = "info,terra_physics=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "terra.log";

/// The filter directive derived from the config, before `RUST_LOG` is consulted.
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - enables the file layer when the config allows it
/// * `config` - supplies the log level and the file logging switch
///
/// ```no_run
/// use terra_config::Config;
///
/// let config = Config::default();
/// terra_log::init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let file_enabled = config.is_none_or(|c| c.debug.log_to_file);
    if debug_build
        && file_enabled
        && let Some(log_dir) = log_dir
        && let Some(log_file) = open_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create `log_dir` if needed and truncate the log file inside it.
///
/// Returns `None` when either step fails; file logging is then skipped.
pub fn open_log_file(log_dir: &Path) -> Option<File> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Cannot create log directory {}: {e}", log_dir.display());
        return None;
    }
    let path = log_dir.join(LOG_FILE_NAME);
    match File::create(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Cannot open log file {}: {e}", path.display());
            None
        }
    }
}

pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
