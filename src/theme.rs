//! Nordic Frost color theme definitions.
//!
//! Palette for the tray view, based on the Nord color scheme with semantic
//! assignments for the three icon states.

use ratatui::style::Color;

use crate::state::IconKey;

// === Nord Polar Night (Dark backgrounds) ===

/// Medium polar night shade.
pub const NORD_POLAR_NIGHT_3: Color = Color::Rgb(67, 76, 94);
/// Lightest polar night shade.
pub const NORD_POLAR_NIGHT_4: Color = Color::Rgb(76, 86, 106);

// === Nord Snow Storm (Light text) ===

/// Primary snow storm shade.
pub const NORD_SNOW_STORM_1: Color = Color::Rgb(216, 222, 233);

// === Nord Frost (Accent blues/cyans) ===

/// Frost accent 2 - cyan (primary accent).
pub const NORD_FROST_2: Color = Color::Rgb(136, 192, 208);

// === Nord Aurora (Status colors) ===

/// Aurora red - errors.
pub const NORD_RED: Color = Color::Rgb(191, 97, 106);
/// Aurora yellow - caution/disconnected.
pub const NORD_YELLOW: Color = Color::Rgb(235, 203, 139);
/// Aurora green - connected.
pub const NORD_GREEN: Color = Color::Rgb(163, 190, 140);

// === Semantic Color Aliases ===

/// Primary text color.
pub const TEXT_PRIMARY: Color = NORD_SNOW_STORM_1;
/// Secondary/muted text color.
pub const TEXT_SECONDARY: Color = NORD_POLAR_NIGHT_4;
/// Primary accent color.
pub const ACCENT_PRIMARY: Color = NORD_FROST_2;
/// Success state color.
pub const SUCCESS: Color = NORD_GREEN;
/// Warning state color.
pub const WARNING: Color = NORD_YELLOW;
/// Error state color.
pub const ERROR: Color = NORD_RED;
/// Inactive/disabled state color.
pub const INACTIVE: Color = Color::Gray;

// === UI Element Colors ===

/// Default border color.
pub const BORDER_DEFAULT: Color = NORD_POLAR_NIGHT_3;
/// Focused element border color.
pub const BORDER_FOCUSED: Color = NORD_FROST_2;

/// Color of the tray glyph for an icon state.
#[must_use]
pub const fn icon_color(key: IconKey) -> Color {
    match key {
        IconKey::Connected => SUCCESS,
        IconKey::Disconnected => WARNING,
        IconKey::Error => ERROR,
    }
}

/// Glyph standing in for the tray icon.
#[must_use]
pub const fn icon_glyph(key: IconKey) -> &'static str {
    match key {
        IconKey::Connected => "●",
        IconKey::Disconnected => "○",
        IconKey::Error => "✖",
    }
}
