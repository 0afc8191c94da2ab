//! Panel row (icon + label) and the settings summary beneath it.

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::constants;
use crate::core::icons::resolve_icon;
use crate::core::scheduler::Phase;
use crate::theme;

/// Render the one-row panel: icon glyph, panel label, icon source.
pub fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.hover.is_some() {
        theme::BORDER_FOCUSED
    } else {
        theme::BORDER_DEFAULT
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(constants::TITLE_PANEL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(state) = &app.tray.current else {
        let waiting = Line::from(Span::styled(
            format!(" … {}", constants::MSG_WAITING),
            Style::default().fg(theme::TEXT_SECONDARY),
        ));
        frame.render_widget(Paragraph::new(waiting), inner);
        return;
    };

    let icon = resolve_icon(app.config.resolved_icon_dir().as_deref(), state.icon_key);
    let icon_text = icon.to_string();
    #[allow(clippy::cast_possible_truncation)]
    let icon_width = (icon_text.chars().count() as u16).saturating_add(1);

    let cols = Layout::horizontal([Constraint::Min(0), Constraint::Length(icon_width)]).split(inner);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            theme::icon_glyph(state.icon_key),
            Style::default()
                .fg(theme::icon_color(state.icon_key))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if !state.panel_label.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            state.panel_label.clone(),
            Style::default()
                .fg(theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), cols[0]);

    let source = Line::from(Span::styled(
        icon_text,
        Style::default().fg(theme::TEXT_SECONDARY),
    ));
    frame.render_widget(
        Paragraph::new(source).alignment(ratatui::layout::Alignment::Right),
        cols[1],
    );
}

fn on_off(value: bool) -> Span<'static> {
    if value {
        Span::styled("on", Style::default().fg(theme::SUCCESS))
    } else {
        Span::styled("off", Style::default().fg(theme::INACTIVE))
    }
}

fn row<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {label:<20}"), Style::default().fg(theme::TEXT_SECONDARY)),
        value,
    ])
}

/// Render current poll settings and update bookkeeping.
pub fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let settings = app.settings();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(constants::TITLE_SETTINGS);

    let script = if app.config.script_path.trim().is_empty() {
        Span::styled("(none)", Style::default().fg(theme::INACTIVE))
    } else {
        Span::raw(app.config.script_path.as_str())
    };

    let last_update = app.tray.updated_at.map_or_else(
        || "never".to_string(),
        |at| format!("{}s ago", Instant::now().saturating_duration_since(at).as_secs()),
    );

    let poller = match app.poll_phase() {
        Phase::Idle => Span::styled("idle", Style::default().fg(theme::INACTIVE)),
        Phase::Scheduled => Span::styled("scheduled", Style::default().fg(theme::SUCCESS)),
        Phase::Polling => Span::styled("polling", Style::default().fg(theme::WARNING)),
    };

    let lines = vec![
        row(
            "Refresh interval",
            Span::styled(
                format!("{}s", settings.refresh_interval().as_secs()),
                Style::default().fg(theme::ACCENT_PRIMARY),
            ),
        ),
        row("Full status hover", on_off(settings.full_status_hover)),
        row("City on panel", on_off(settings.show_city_on_panel)),
        row("Script", script),
        row("Status command", Span::raw(app.config.status_command.join(" "))),
        row("Poller", poller),
        row(
            "Last update",
            Span::raw(format!(
                "{last_update} ({} shown, {} polls)",
                app.tray.updates,
                app.polls_issued()
            )),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
