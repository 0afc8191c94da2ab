//! Application configuration management.
//!
//! Handles config directory resolution (CLI flag / env > `XDG_CONFIG_HOME` > default)
//! and loading `config.toml`. The file is only ever read; runtime toggles made
//! in the tray are not written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::state::PollSettings;

/// User-configurable application settings.
///
/// All fields have sensible defaults. Users can override any subset via
/// `config.toml` in the config directory -- missing fields use defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Seconds between scheduled status probes.
    pub refresh_interval: u64,
    /// Show the whole status output on hover instead of the summary.
    pub full_status_hover: bool,
    /// Mirror the connected city onto the panel label.
    pub show_city_on_panel: bool,
    /// Script run on activation; may start with `~`.
    pub script_path: String,
    /// Status command and its arguments.
    pub status_command: Vec<String>,
    /// First line of the hover text.
    pub hover_header: String,
    /// Directory holding `connected.png`, `disconnected.png`, `error.png`.
    pub icon_dir: Option<PathBuf>,
    /// Terminal used for the user script; the script command is appended.
    pub terminal_command: Vec<String>,
    /// UI refresh rate in milliseconds.
    pub tick_rate: u64,
    /// Tracing filter (`"debug"`, `"info"`, `"nordtray=trace"`, ...).
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval: constants::DEFAULT_REFRESH_INTERVAL,
            full_status_hover: false,
            show_city_on_panel: false,
            script_path: String::new(),
            status_command: constants::DEFAULT_STATUS_COMMAND
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            hover_header: constants::DEFAULT_HOVER_HEADER.to_string(),
            icon_dir: None,
            terminal_command: constants::DEFAULT_TERMINAL_COMMAND
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            tick_rate: constants::DEFAULT_TICK_RATE,
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// The subset the scheduler and presenter care about.
    #[must_use]
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            refresh_interval_secs: self.refresh_interval.max(constants::MIN_REFRESH_INTERVAL),
            full_status_hover: self.full_status_hover,
            show_city_on_panel: self.show_city_on_panel,
        }
    }

    /// Icon directory with a leading `~` expanded.
    #[must_use]
    pub fn resolved_icon_dir(&self) -> Option<PathBuf> {
        self.icon_dir.as_ref().map(|dir| {
            crate::core::launcher::expand_home(&dir.to_string_lossy(), dirs::home_dir().as_deref())
        })
    }
}

/// Resolves the config directory path.
///
/// Precedence: CLI flag / `NORDTRAY_CONFIG_DIR` > `XDG_CONFIG_HOME` > `~/.config/nordtray`.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined or created.
pub fn resolve_config_dir(cli_override: Option<&PathBuf>) -> std::io::Result<PathBuf> {
    let path = if let Some(dir) = cli_override {
        // Resolve relative paths to absolute so the config dir is stable
        // regardless of the working directory.
        if dir.is_relative() {
            std::env::current_dir()?.join(dir)
        } else {
            dir.clone()
        }
    } else {
        default_config_dir()?
    };

    std::fs::create_dir_all(&path)?;
    std::fs::canonicalize(&path)
}

/// Computes the default config directory (no CLI override).
fn default_config_dir() -> std::io::Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let xdg_path = PathBuf::from(xdg);
        if xdg_path.is_absolute() {
            return Ok(xdg_path.join(constants::APP_NAME));
        }
    }

    let home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home.join(".config").join(constants::APP_NAME))
}

/// Loads `AppConfig` from `config.toml` in the given directory.
///
/// Returns defaults if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(config_dir: &Path) -> Result<AppConfig, String> {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read {}: {e}", config_path.display()))?;

    toml::from_str(&content)
        .map_err(|e| format!("Invalid config at {}: {e}", config_path.display()))
}
