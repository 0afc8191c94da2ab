//! UI rendering module

mod overlays;
mod panel;
mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

/// Main render function: panel, settings, footer, then overlays on top.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    app.panel_area = chunks[0];
    panel::render_panel(frame, app, chunks[0]);
    panel::render_settings(frame, app, chunks[1]);
    widgets::footer::render(frame, app, chunks[2]);

    if app.hover.is_some() {
        overlays::hover::render(frame, app, chunks[0]);
    }

    if app.toast.is_some() {
        overlays::toast::render(frame, app);
    }
}
