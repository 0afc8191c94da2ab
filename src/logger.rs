//! Tracing setup.
//!
//! The tray owns the terminal, so it logs to a file under the config
//! directory. The headless commands log to stderr, leaving stdout for
//! status output. `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::constants;

/// Where log lines go.
pub enum LogTarget<'a> {
    /// `<config_dir>/logs/nordtray.log`
    File { config_dir: &'a Path },
    Stderr,
}

/// Path of the tray log file for `config_dir`.
#[must_use]
pub fn log_file_path(config_dir: &Path) -> PathBuf {
    config_dir
        .join(constants::LOGS_DIR_NAME)
        .join(constants::LOG_FILE_NAME)
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_LEVEL))
    })
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(level: &str, target: &LogTarget<'_>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(level));

    let installed = match target {
        LogTarget::File { config_dir } => {
            let path = log_file_path(config_dir);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| eyre!("failed to initialize logging: {e}"))?;

    tracing::info!(
        version = constants::APP_VERSION,
        "starting {}",
        constants::APP_NAME
    );
    Ok(())
}
