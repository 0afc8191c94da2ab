//! Icon lookup: per-application icon files first, desktop theme names second.

use std::path::{Path, PathBuf};

use crate::constants;
use crate::state::IconKey;

/// Where the tray icon comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconSource {
    /// `<icon_dir>/<key>.png` exists.
    File(PathBuf),
    /// Fallback desktop theme icon name.
    Themed(&'static str),
}

impl std::fmt::Display for IconSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconSource::File(path) => write!(f, "{}", path.display()),
            IconSource::Themed(name) => f.write_str(name),
        }
    }
}

/// Resolve the icon for `key`.
#[must_use]
pub fn resolve_icon(icon_dir: Option<&Path>, key: IconKey) -> IconSource {
    if let Some(dir) = icon_dir {
        let path = dir
            .join(key.as_str())
            .with_extension(constants::ICON_FILE_EXTENSION);
        if path.is_file() {
            return IconSource::File(path);
        }
    }
    IconSource::Themed(key.themed_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themed_fallback_without_dir() {
        assert_eq!(
            resolve_icon(None, IconKey::Connected),
            IconSource::Themed("network-vpn-symbolic")
        );
        assert_eq!(
            resolve_icon(None, IconKey::Error),
            IconSource::Themed("dialog-error-symbolic")
        );
    }

    #[test]
    fn test_icon_file_preferred_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join("disconnected.png");
        std::fs::write(&icon, b"png").unwrap();

        assert_eq!(
            resolve_icon(Some(dir.path()), IconKey::Disconnected),
            IconSource::File(icon)
        );
        // Other keys still fall back.
        assert_eq!(
            resolve_icon(Some(dir.path()), IconKey::Connected),
            IconSource::Themed("network-vpn-symbolic")
        );
    }
}
