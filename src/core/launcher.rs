//! Runs the user's script in a terminal that stays open afterwards.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Why the user script could not be started.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("no script configured")]
    NotConfigured,

    #[error("script not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("terminal command is empty")]
    NoTerminal,

    #[error("failed to start terminal: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Expand a leading `~` to `home`.
#[must_use]
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            let rest = rest.trim_start_matches('/');
            if rest.is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            }
        }
        _ => PathBuf::from(path),
    }
}

/// Quote `s` for a POSIX shell.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Build the argv that opens `terminal` running `script` followed by an
/// interactive shell.
fn terminal_argv(terminal: &[String], script: &Path) -> Vec<String> {
    let inner = format!("{}; exec bash", shell_quote(&script.to_string_lossy()));
    terminal
        .iter()
        .cloned()
        .chain(["bash".to_string(), "-c".to_string(), inner])
        .collect()
}

/// Launch the configured script.
///
/// Returns the expanded path that was started.
///
/// # Errors
///
/// [`LaunchError::NotFound`] when the script does not exist; the caller shows
/// it to the user. Polling is unaffected either way.
pub fn launch_script(script_path: &str, terminal: &[String]) -> Result<PathBuf, LaunchError> {
    let script_path = script_path.trim();
    if script_path.is_empty() {
        return Err(LaunchError::NotConfigured);
    }

    let path = expand_home(script_path, dirs::home_dir().as_deref());
    if !path.exists() {
        return Err(LaunchError::NotFound(path));
    }

    if terminal.is_empty() {
        return Err(LaunchError::NoTerminal);
    }
    let argv = terminal_argv(terminal, &path);
    let Some((program, args)) = argv.split_first() else {
        return Err(LaunchError::NoTerminal);
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // Reap the terminal in the background so it never lingers as a zombie.
    std::thread::spawn(move || {
        let _ = child.wait();
    });

    tracing::info!(script = %path.display(), "launched user script");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/alice");
        assert_eq!(
            expand_home("~/bin/vpn.sh", Some(home)),
            PathBuf::from("/home/alice/bin/vpn.sh")
        );
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/alice"));
        assert_eq!(
            expand_home("/opt/vpn.sh", Some(home)),
            PathBuf::from("/opt/vpn.sh")
        );
        // Only a leading tilde is expanded.
        assert_eq!(
            expand_home("/opt/~vpn.sh", Some(home)),
            PathBuf::from("/opt/~vpn.sh")
        );
        assert_eq!(expand_home("~/x", None), PathBuf::from("~/x"));
        assert_eq!(
            expand_home("~bob/vpn.sh", Some(home)),
            PathBuf::from("~bob/vpn.sh")
        );
    }

    #[test]
    fn test_terminal_argv_quotes_path() {
        let terminal = vec!["gnome-terminal".to_string(), "--".to_string()];
        let argv = terminal_argv(&terminal, Path::new("/tmp/it's here.sh"));
        assert_eq!(
            argv,
            vec![
                "gnome-terminal",
                "--",
                "bash",
                "-c",
                r"'/tmp/it'\''s here.sh'; exec bash",
            ]
        );
    }

    #[test]
    fn test_launch_unconfigured() {
        assert!(matches!(
            launch_script("  ", &[]),
            Err(LaunchError::NotConfigured)
        ));
    }

    #[test]
    fn test_launch_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.sh");
        let err = launch_script(&missing.to_string_lossy(), &["true".to_string()]).unwrap_err();
        match err {
            LaunchError::NotFound(path) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_launch_without_terminal() {
        let script = tempfile::NamedTempFile::new().unwrap();
        let err = launch_script(&script.path().to_string_lossy(), &[]).unwrap_err();
        assert!(matches!(err, LaunchError::NoTerminal));
    }

    #[test]
    fn test_launch_spawns_terminal() {
        let script = tempfile::NamedTempFile::new().unwrap();
        // `true` ignores the bash arguments and exits immediately.
        let path = launch_script(&script.path().to_string_lossy(), &["true".to_string()]).unwrap();
        assert_eq!(path, script.path());
    }
}
