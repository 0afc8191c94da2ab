//! Application-wide constants and configuration defaults.
//!
//! This module defines the static values used throughout nordtray,
//! including polling defaults, icon names, file names, and UI messages.

use std::time::Duration;

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Polling Defaults ===

/// Default seconds between scheduled status probes.
pub const DEFAULT_REFRESH_INTERVAL: u64 = 10;
/// Smallest refresh interval the scheduler accepts.
pub const MIN_REFRESH_INTERVAL: u64 = 1;
/// Default status command (argv).
pub const DEFAULT_STATUS_COMMAND: [&str; 2] = ["nordvpn", "status"];
/// Header line of the hover text.
pub const DEFAULT_HOVER_HEADER: &str = "NordVPN";
/// UI refresh rate in milliseconds.
pub const DEFAULT_TICK_RATE: u64 = 250;
/// Default tracing filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Terminal used to run the user script (argv prefix).
pub const DEFAULT_TERMINAL_COMMAND: [&str; 2] = ["gnome-terminal", "--"];

// === Path Configuration ===

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Name of the logs subdirectory.
pub const LOGS_DIR_NAME: &str = "logs";
/// Log file written while the tray owns the terminal.
pub const LOG_FILE_NAME: &str = "nordtray.log";

// === Status Text Patterns ===

/// First line starting with `Status:` is the status line.
pub const STATUS_LINE_PATTERN: &str = r"(?m)^Status: ?.*$";
/// First line starting with `City: ` carries the city name.
pub const CITY_LINE_PATTERN: &str = r"(?m)^City: (.*)$";
/// Substring that marks an established connection.
pub const CONNECTED_MARKER: &str = "Status: Connected";

// === Icons ===

/// Themed icon for an established connection.
pub const ICON_THEMED_CONNECTED: &str = "network-vpn-symbolic";
/// Themed icon for no connection.
pub const ICON_THEMED_DISCONNECTED: &str = "network-vpn-disconnected-symbolic";
/// Themed icon for a failed probe.
pub const ICON_THEMED_ERROR: &str = "dialog-error-symbolic";
/// Extension of per-application icon files.
pub const ICON_FILE_EXTENSION: &str = "png";

// === UI Messages ===

/// Hover text shown when the probe itself fails.
pub const MSG_PROBE_ERROR: &str = "Error fetching status";
/// Placeholder before the first poll completes.
pub const MSG_WAITING: &str = "Waiting for first status...";
/// Toast shown when the script path is unset.
pub const MSG_SCRIPT_NOT_CONFIGURED: &str = "No script configured (set script_path)";
/// Toast prefix when the script file is missing.
pub const MSG_SCRIPT_NOT_FOUND: &str = "Script not found: ";
/// Toast prefix when the script was launched.
pub const MSG_SCRIPT_LAUNCHED: &str = "Launched ";
/// Toast after a successful config reload.
pub const MSG_CONFIG_RELOADED: &str = "Configuration reloaded";

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

// === UI Labels & Titles ===

pub const TITLE_PANEL: &str = " Panel ";
pub const TITLE_HOVER: &str = " Status ";
pub const TITLE_SETTINGS: &str = " Settings ";
