//! Tray application state and input handling.
//!
//! `App` glues the poll scheduler to the terminal front end: it forwards
//! ticks, turns pointer and key input into on-demand polls and settings
//! changes, and holds the display state the UI draws.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::{self, AppConfig};
use crate::constants;
use crate::core::launcher::{self, LaunchError};
use crate::core::probe::{CommandProbe, StatusProbe};
use crate::core::scheduler::{Phase, PollScheduler};
use crate::core::sink::DisplaySink;
use crate::state::{DisplayState, HoverSource, PollSettings, Toast, ToastType};

/// The tray's copy of the latest display state.
#[derive(Debug, Default)]
pub struct TrayView {
    pub current: Option<DisplayState>,
    pub updated_at: Option<Instant>,
    pub updates: u64,
}

impl DisplaySink for TrayView {
    fn show(&mut self, state: DisplayState) {
        self.current = Some(state);
        self.updated_at = Some(Instant::now());
        self.updates += 1;
    }
}

pub struct App {
    pub config: AppConfig,
    config_dir: PathBuf,
    scheduler: PollScheduler,
    pub tray: TrayView,
    /// Open hover popup and what opened it.
    pub hover: Option<HoverSource>,
    pub toast: Option<Toast>,
    /// Screen area of the panel row, recorded by the renderer for hit tests.
    pub panel_area: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, config_dir: PathBuf) -> Self {
        let probe = Arc::new(CommandProbe::new(&config.status_command));
        Self::with_probe(config, config_dir, probe)
    }

    pub fn with_probe(config: AppConfig, config_dir: PathBuf, probe: Arc<dyn StatusProbe>) -> Self {
        let scheduler = PollScheduler::new(probe, config.poll_settings(), config.hover_header.clone());
        Self {
            config,
            config_dir,
            scheduler,
            tray: TrayView::default(),
            hover: None,
            toast: None,
            panel_area: Rect::default(),
            should_quit: false,
        }
    }

    /// First poll plus timer.
    pub fn start(&mut self) {
        self.scheduler.start(Instant::now());
    }

    /// Current poll settings (including runtime toggles).
    #[must_use]
    pub fn settings(&self) -> &PollSettings {
        self.scheduler.settings()
    }

    #[must_use]
    pub fn poll_phase(&self) -> Phase {
        self.scheduler.phase()
    }

    /// Polls issued by the current scheduler.
    #[must_use]
    pub fn polls_issued(&self) -> u64 {
        self.scheduler.requests_issued()
    }

    /// Periodic tick from the event loop.
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        self.scheduler.on_tick(now);
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    /// Deliver finished probes to the tray view.
    pub fn process_external(&mut self) {
        self.scheduler.process_results(&mut self.tray);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('h') => {
                if self.hover.is_some() {
                    self.hover_leave();
                } else {
                    self.hover_enter(HoverSource::Keyboard);
                }
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char('f') => {
                let settings = PollSettings {
                    full_status_hover: !self.settings().full_status_hover,
                    ..self.settings().clone()
                };
                self.apply_settings(settings);
            }
            KeyCode::Char('c') => {
                let settings = PollSettings {
                    show_city_on_panel: !self.settings().show_city_on_panel,
                    ..self.settings().clone()
                };
                self.apply_settings(settings);
            }
            KeyCode::Char('+' | '=') => self.step_interval(1),
            KeyCode::Char('-') => self.step_interval(-1),
            KeyCode::Char('L') => self.reload_config(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let over_panel = contains(self.panel_area, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                if over_panel && self.hover.is_none() {
                    self.hover_enter(HoverSource::Pointer);
                } else if !over_panel && self.hover == Some(HoverSource::Pointer) {
                    self.hover_leave();
                }
            }
            MouseEventKind::Down(MouseButton::Left) if over_panel => self.activate(),
            MouseEventKind::Down(MouseButton::Middle) if over_panel => self.refresh(),
            _ => {}
        }
    }

    /// Terminal resize; the next draw recomputes the panel area.
    pub fn on_resize(&mut self, _width: u16, _height: u16) {
        self.panel_area = Rect::default();
    }

    /// Opening the hover popup refreshes the status.
    fn hover_enter(&mut self, source: HoverSource) {
        self.hover = Some(source);
        self.scheduler.poll_now();
    }

    fn hover_leave(&mut self) {
        self.hover = None;
    }

    fn refresh(&mut self) {
        tracing::debug!("manual refresh");
        self.scheduler.poll_now();
    }

    fn quit(&mut self) {
        self.scheduler.stop();
        self.should_quit = true;
    }

    fn step_interval(&mut self, delta: i64) {
        let settings = self.settings().with_interval_step(delta);
        if settings != *self.settings() {
            self.apply_settings(settings);
        }
    }

    fn apply_settings(&mut self, settings: PollSettings) {
        self.scheduler.update_settings(settings, Instant::now());
    }

    /// Run the user script. Failures become a toast; polling is untouched.
    fn activate(&mut self) {
        match launcher::launch_script(&self.config.script_path, &self.config.terminal_command) {
            Ok(path) => self.show_toast(
                format!("{}{}", constants::MSG_SCRIPT_LAUNCHED, path.display()),
                ToastType::Success,
            ),
            Err(LaunchError::NotConfigured) => self.show_toast(
                constants::MSG_SCRIPT_NOT_CONFIGURED.to_string(),
                ToastType::Warning,
            ),
            Err(LaunchError::NotFound(path)) => {
                tracing::warn!(script = %path.display(), "user script not found");
                self.show_toast(
                    format!("{}{}", constants::MSG_SCRIPT_NOT_FOUND, path.display()),
                    ToastType::Error,
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to launch user script");
                self.show_toast(e.to_string(), ToastType::Error);
            }
        }
    }

    /// Re-read `config.toml` and push the result into the scheduler.
    fn reload_config(&mut self) {
        let config = match config::load_config(&self.config_dir) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "config reload failed");
                self.show_toast(e, ToastType::Error);
                return;
            }
        };

        let rebuild = config.status_command != self.config.status_command
            || config.hover_header != self.config.hover_header;

        if rebuild {
            tracing::info!("status command changed; restarting poller");
            let probe = Arc::new(CommandProbe::new(&config.status_command));
            self.scheduler =
                PollScheduler::new(probe, config.poll_settings(), config.hover_header.clone());
            self.scheduler.start(Instant::now());
        } else {
            self.apply_settings(config.poll_settings());
        }

        self.config = config;
        self.show_toast(constants::MSG_CONFIG_RELOADED.to_string(), ToastType::Info);
    }

    fn show_toast(&mut self, message: String, toast_type: ToastType) {
        self.toast = Some(Toast {
            message,
            toast_type,
            expires: Instant::now() + constants::TOAST_DURATION,
        });
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
