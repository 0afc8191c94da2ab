//! UI-specific state types.

use std::time::Instant;

/// Toast notification severity.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ToastType {
    /// Informational message (Blue)
    #[default]
    Info,
    /// Success message (Green)
    Success,
    /// Warning message (Yellow)
    Warning,
    /// Error message (Red)
    Error,
}

/// One-shot notification shown over the tray.
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    #[allow(clippy::struct_field_names)]
    pub toast_type: ToastType,
    /// When the toast should disappear.
    pub expires: Instant,
}

impl Toast {
    /// Check if the toast notification has expired
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.expires
    }
}

/// How the hover popup was opened; pointer-opened popups close when the
/// pointer leaves the panel row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HoverSource {
    Pointer,
    Keyboard,
}
