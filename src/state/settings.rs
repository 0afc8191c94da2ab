//! Poll settings snapshot.

use std::time::Duration;

use crate::constants;

/// Settings read by the scheduler and the presenter.
///
/// A plain value: the scheduler keeps the latest copy and is handed a new
/// one on every change instead of watching a live binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollSettings {
    /// Seconds between scheduled polls, never below one.
    pub refresh_interval_secs: u64,
    /// Hover shows the entire raw output instead of the summary.
    pub full_status_hover: bool,
    /// Mirror the city onto the panel label while connected.
    pub show_city_on_panel: bool,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: constants::DEFAULT_REFRESH_INTERVAL,
            full_status_hover: false,
            show_city_on_panel: false,
        }
    }
}

impl PollSettings {
    /// Timer period, clamped to the minimum interval.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(
            self.refresh_interval_secs
                .max(constants::MIN_REFRESH_INTERVAL),
        )
    }

    /// Copy with the interval moved by `delta` seconds.
    #[must_use]
    pub fn with_interval_step(&self, delta: i64) -> Self {
        let current = i64::try_from(self.refresh_interval_secs).unwrap_or(i64::MAX);
        let stepped = current.saturating_add(delta);
        let min = i64::try_from(constants::MIN_REFRESH_INTERVAL).unwrap_or(1);
        Self {
            refresh_interval_secs: u64::try_from(stepped.max(min))
                .unwrap_or(constants::MIN_REFRESH_INTERVAL),
            ..self.clone()
        }
    }
}
