//! Invocation of the external status command.
//!
//! One probe spawns exactly one process and blocks until it exits, so the
//! child is always reaped. Every failure mode is folded into [`ProbeError`];
//! nothing here panics or leaks a spawn error to the caller.
//!
//! There is no timeout: a hung status command keeps its worker thread busy
//! until it exits. Scheduled polls are skipped while one is outstanding, so a
//! hang stalls updates instead of piling up processes.

use std::process::{Command, Stdio};

/// Why a probe produced no usable output.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The command could not be launched (missing binary, permissions).
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited non-zero.
    #[error("status command exited with {}: {stderr}", exit_code_label(.code))]
    Exit { code: Option<i32>, stderr: String },

    /// The command exited cleanly but printed nothing.
    #[error("status command produced no output: {stderr}")]
    EmptyOutput { stderr: String },
}

#[allow(clippy::ref_option)]
fn exit_code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("code {c}"))
}

impl ProbeError {
    /// Captured standard error text, if the process got that far.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Spawn { .. } => None,
            Self::Exit { stderr, .. } | Self::EmptyOutput { stderr } => Some(stderr),
        }
    }
}

/// Source of raw status text.
///
/// Implementations must be callable from a worker thread.
pub trait StatusProbe: Send + Sync {
    /// Run the status command once and return its trimmed stdout.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] when the command cannot be spawned, exits
    /// non-zero, or prints nothing.
    fn probe(&self) -> Result<String, ProbeError>;
}

/// Probe backed by a real external command.
#[derive(Clone, Debug)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    /// Build from an argv list; an empty list falls back to the default command.
    #[must_use]
    pub fn new(argv: &[String]) -> Self {
        match argv.split_first() {
            Some((program, args)) => Self {
                program: program.clone(),
                args: args.to_vec(),
            },
            None => Self {
                program: crate::constants::DEFAULT_STATUS_COMMAND[0].to_string(),
                args: crate::constants::DEFAULT_STATUS_COMMAND[1..]
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect(),
            },
        }
    }

    /// Human-readable command line for logs and errors.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl StatusProbe for CommandProbe {
    fn probe(&self) -> Result<String, ProbeError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProbeError::Spawn {
                command: self.command_line(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(ProbeError::Exit {
                code: output.status.code(),
                stderr,
            });
        }

        // Only a silent command is a failure; blank output still parses.
        if output.stdout.is_empty() {
            return Err(ProbeError::EmptyOutput { stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
