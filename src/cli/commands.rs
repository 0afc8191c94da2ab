//! Headless command handlers.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::cli::args::Commands;
use crate::config::AppConfig;
use crate::core::icons::resolve_icon;
use crate::core::probe::CommandProbe;
use crate::core::scheduler::PollScheduler;
use crate::core::sink::{DisplaySink, JsonLineSink};
use crate::state::DisplayState;

/// Runs a headless command.
///
/// # Errors
///
/// Returns an error if the single probe of `status` delivers nothing.
pub fn handle_command(command: &Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Status { json } => handle_status(config, *json),
        Commands::Watch => {
            handle_watch(config);
            Ok(())
        }
    }
}

fn build_scheduler(config: &AppConfig) -> PollScheduler {
    let probe = CommandProbe::new(&config.status_command);
    tracing::debug!(command = %probe.command_line(), "using status command");
    PollScheduler::new(
        Arc::new(probe),
        config.poll_settings(),
        config.hover_header.clone(),
    )
}

/// Human-readable rendering of a display state.
struct TextSink<W: Write> {
    writer: W,
    icon_dir: Option<std::path::PathBuf>,
}

impl<W: Write> DisplaySink for TextSink<W> {
    fn show(&mut self, state: DisplayState) {
        let icon = resolve_icon(self.icon_dir.as_deref(), state.icon_key);
        let text = format_text(&state, &icon.to_string());
        if let Err(e) = write!(self.writer, "{text}") {
            tracing::warn!(error = %e, "failed to write status");
        }
    }
}

fn format_text(state: &DisplayState, icon: &str) -> String {
    use std::fmt::Write as _;

    let mut out = format!("icon:  {} ({icon})\n", state.icon_key);
    if !state.panel_label.is_empty() {
        let _ = writeln!(out, "label: {}", state.panel_label);
    }
    out.push('\n');
    out.push_str(&state.hover_text);
    out.push('\n');
    out
}

/// Probe once through the full pipeline and print the result.
fn handle_status(config: &AppConfig, json: bool) -> Result<()> {
    let mut scheduler = build_scheduler(config);
    let stdout = std::io::stdout().lock();
    let mut sink: Box<dyn DisplaySink> = if json {
        Box::new(JsonLineSink::new(stdout, config.resolved_icon_dir()))
    } else {
        Box::new(TextSink {
            writer: stdout,
            icon_dir: config.resolved_icon_dir(),
        })
    };

    // Blocks for as long as the status command runs.
    scheduler.start(Instant::now());
    let delivered = scheduler.block_for_result(sink.as_mut());
    scheduler.stop();

    if delivered == 0 {
        return Err(eyre!("status command finished but no status was delivered"));
    }
    Ok(())
}

/// Poll forever, writing one JSON line per update.
fn handle_watch(config: &AppConfig) {
    let mut scheduler = build_scheduler(config);
    let mut sink = JsonLineSink::new(std::io::stdout().lock(), config.resolved_icon_dir());
    let tick = Duration::from_millis(config.tick_rate.max(1));

    scheduler.start(Instant::now());
    loop {
        scheduler.on_tick(Instant::now());
        scheduler.wait_for_result(&mut sink, tick);
    }
}
