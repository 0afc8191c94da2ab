//! Display state handed to the tray sink.

use serde::Serialize;

use crate::constants;

/// Which icon the tray should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKey {
    Connected,
    Disconnected,
    /// Only produced when the probe itself failed.
    Error,
}

impl IconKey {
    /// File stem used for per-application icon files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Error => "error",
        }
    }

    /// Desktop theme icon used when no icon file is present.
    #[must_use]
    pub const fn themed_name(self) -> &'static str {
        match self {
            Self::Connected => constants::ICON_THEMED_CONNECTED,
            Self::Disconnected => constants::ICON_THEMED_DISCONNECTED,
            Self::Error => constants::ICON_THEMED_ERROR,
        }
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon, hover text, and panel label derived from one poll.
///
/// Always delivered to a sink as a whole value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub icon_key: IconKey,
    pub hover_text: String,
    /// Empty unless the city is mirrored onto the panel.
    pub panel_label: String,
}
