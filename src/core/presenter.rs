//! Derivation of display state from a status snapshot.

use crate::constants;
use crate::core::probe::ProbeError;
use crate::state::{DisplayState, IconKey, PollSettings, VpnStatus};

/// Map a parsed snapshot to what the tray shows.
///
/// `header` is the first line of the hover text (the VPN product name).
/// A successful probe never yields [`IconKey::Error`], however little of the
/// text was recognised.
#[must_use]
pub fn present(status: &VpnStatus, settings: &PollSettings, header: &str) -> DisplayState {
    let connected = status.connection_state().is_connected();

    let icon_key = if connected {
        IconKey::Connected
    } else {
        IconKey::Disconnected
    };

    let hover_text = if settings.full_status_hover {
        format!("{header}\n{}", status.raw_text())
    } else {
        summary_hover(status, header)
    };

    let panel_label = match status.city() {
        Some(city) if settings.show_city_on_panel && connected => city.to_string(),
        _ => String::new(),
    };

    DisplayState {
        icon_key,
        hover_text,
        panel_label,
    }
}

/// Header plus the matched status and city lines. Falls back to the raw text
/// when neither line matched so nothing is silently dropped.
fn summary_hover(status: &VpnStatus, header: &str) -> String {
    let mut lines = vec![header];

    if let Some(line) = status.status_line() {
        lines.push(line);
    }
    if let Some(line) = status.city_line() {
        lines.push(line);
    }
    if status.status_line().is_none() && status.city_line().is_none() {
        lines.push(status.raw_text());
    }

    lines.join("\n")
}

/// Display state for a probe that failed outright.
#[must_use]
pub fn present_error(err: &ProbeError) -> DisplayState {
    tracing::debug!(error = %err, "presenting probe failure");
    DisplayState {
        icon_key: IconKey::Error,
        hover_text: constants::MSG_PROBE_ERROR.to_string(),
        panel_label: String::new(),
    }
}
