//! # nordtray
//!
//! Terminal tray indicator for the `NordVPN` command-line client.
//! Polls `nordvpn status`, shows the connection as an icon, hover text and
//! panel label, and launches a user script on activation.
//!
//! ## Modules
//! - [`app`]: Tray state and input handling.
//! - [`cli`]: Command-line argument parsing and headless commands.
//! - [`config`]: Configuration management.
//! - [`core`]: Probe, parser, presenter and poll scheduler.
//! - [`event`]: Event loop handling.
//! - [`ui`]: TUI rendering.

mod app;
mod cli;
mod config;
mod constants;
mod core;
mod event;
mod logger;
mod state;
mod theme;
mod ui;

use app::App;
use clap::Parser;
use cli::args::Args;
use color_eyre::Result;
use event::{Event, EventHandler};
use logger::LogTarget;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let config_dir = config::resolve_config_dir(args.config_dir.as_ref())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to resolve config directory: {e}"))?;

    let app_config = match config::load_config(&config_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Fix the file or remove it to use defaults:");
            eprintln!("  nano {}/config.toml", config_dir.display());
            eprintln!("  rm {}/config.toml", config_dir.display());
            std::process::exit(1);
        }
    };

    // Headless commands keep stdout for their own output
    if let Some(command) = &args.command {
        logger::init(&app_config.log_level, &LogTarget::Stderr)?;
        return cli::commands::handle_command(command, &app_config);
    }

    logger::init(
        &app_config.log_level,
        &LogTarget::File {
            config_dir: &config_dir,
        },
    )?;

    let terminal = init_terminal()?;
    let result = run_tui(terminal, app_config, config_dir);
    restore_terminal();

    tracing::info!("shutting down");
    result
}

/// Runs the main TUI event loop.
fn run_tui(
    mut terminal: ratatui::DefaultTerminal,
    config: config::AppConfig,
    config_dir: std::path::PathBuf,
) -> Result<()> {
    let tick_rate = config.tick_rate;
    let mut app = App::new(config, config_dir);
    let events = EventHandler::new(tick_rate);

    app.start();
    terminal.draw(|frame| ui::render(frame, &mut app))?;

    while !app.should_quit {
        match events.next()? {
            Event::Key(key_event) => app.handle_key(key_event),
            Event::Mouse(mouse_event) => app.handle_mouse(mouse_event),
            Event::Tick => app.on_tick(),
            Event::Resize(width, height) => app.on_resize(width, height),
        }

        // Deliver finished probes before drawing
        app.process_external();
        terminal.draw(|frame| ui::render(frame, &mut app))?;
    }

    Ok(())
}

fn init_terminal() -> Result<ratatui::DefaultTerminal> {
    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal() {
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();
}
